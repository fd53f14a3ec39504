use bytes::Bytes;

/// A request body fixture, the `Content-Type` it is sent with and its size class.
#[derive(Debug, Copy, Clone)]
pub struct Fixture {
    name: &'static str,
    content_type: &'static str,
    content: &'static str,
    size: BodySize,
}

impl Fixture {
    pub const fn small(name: &'static str, content_type: &'static str, content: &'static str) -> Self {
        Self { name, content_type, content, size: BodySize::Small }
    }

    pub const fn large(name: &'static str, content_type: &'static str, content: &'static str) -> Self {
        Self { name, content_type, content, size: BodySize::Large }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn body(&self) -> Bytes {
        Bytes::from_static(self.content.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> BodySize {
        self.size
    }
}

/// Fixtures of one size class share a criterion group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodySize {
    Small,
    Large,
}

impl BodySize {
    pub const ALL: [BodySize; 2] = [BodySize::Small, BodySize::Large];

    pub fn group_name(self) -> &'static str {
        match self {
            BodySize::Small => "dispatch_small_body",
            BodySize::Large => "dispatch_large_body",
        }
    }

    /// Large bodies take long enough per iteration that fewer samples suffice.
    pub fn sample_size(self) -> usize {
        match self {
            BodySize::Small => 100,
            BodySize::Large => 20,
        }
    }
}
