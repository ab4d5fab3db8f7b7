/// Query-string parameters of one request: an ordered multi-map whose keys
/// are trimmed and lower-cased and whose values are lower-cased.
///
/// Keys keep the order in which they first appeared; repeated keys collect
/// their values in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: Vec<(String, Vec<String>)>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key.as_ref(), value.as_ref());
        }
        params
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim().to_lowercase();
        let value = value.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
