/// Resource limits applied by the [`crate::composite`] driver, both when building a
/// nested [`crate::Value::List`] and when decoding one back out of bytes.
///
/// These exist to bound stack usage and total allocation for untrusted input; the
/// defaults are generous enough that no well formed key for an ordered store should
/// ever hit them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    pub max_depth: u32,
    pub max_encoded_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: 16,
            max_encoded_size: 1024 * 1024,
        }
    }
}
