use std::ops::Range;

/// Parameters of one indexed, instanced draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawEntry {
    pub index_count: u32,
    pub instance_count: u32,
    pub start_index: u32,
    pub base_vertex: i32,
    pub start_instance: u32,
}

impl DrawEntry {
    pub fn new(index_count: u32, instance_count: u32) -> Self {
        Self {
            index_count,
            instance_count,
            ..Default::default()
        }
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_base_vertex(mut self, base_vertex: i32) -> Self {
        self.base_vertex = base_vertex;
        self
    }

    pub fn indices(&self) -> Range<u32> {
        self.start_index..self.start_index + self.index_count
    }

    pub fn instances(&self) -> Range<u32> {
        self.start_instance..self.start_instance + self.instance_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_follow_start_and_count() {
        let entry = DrawEntry::new(36, 1).with_start_index(12).with_base_vertex(8);
        assert_eq!(entry.indices(), 12..48);
        assert_eq!(entry.instances(), 0..1);
        assert_eq!(entry.base_vertex, 8);
    }
}
