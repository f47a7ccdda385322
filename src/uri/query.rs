/// Query parameters in insertion order.
///
/// Keys are unique. Merging replaces values in place and appends new keys,
/// so the serialized order stays stable across link building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	pairs: Vec<(String, String)>,
}

impl Query {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a pair, replacing the value of an existing key in place.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();
		match self.pairs.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => *existing = value,
			None => self.pairs.push((key, value)),
		}
	}

	/// Insert a pair only if the key is not present yet.
	pub(crate) fn insert_first(&mut self, key: String, value: String) {
		if !self.contains_key(&key) {
			self.pairs.push((key, value));
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.pairs.iter().any(|(k, _)| k == key)
	}

	pub fn remove(&mut self, key: &str) -> Option<String> {
		let index = self.pairs.iter().position(|(k, _)| k == key)?;
		Some(self.pairs.remove(index).1)
	}

	pub fn clear(&mut self) {
		self.pairs.clear();
	}

	/// Override semantics: keys of `other` replace existing ones, the rest are kept.
	pub fn merge(&mut self, other: &Query) {
		for (key, value) in other.iter() {
			self.insert(key, value);
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Serialize as `?k1=v1&k2=v2`, or an empty string when there are no pairs.
	pub fn to_query_string(&self) -> String {
		if self.is_empty() {
			return String::new();
		}
		let joined = self
			.iter()
			.map(|(k, v)| format!("{k}={v}"))
			.collect::<Vec<_>>()
			.join("&");
		format!("?{joined}")
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut query = Query::new();
		for (key, value) in iter {
			query.insert(key, value);
		}
		query
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_insert_replaces_in_place() {
		let mut query: Query = [("a", "1"), ("b", "2")].into_iter().collect();
		query.insert("a", "3");
		assert_eq!(query.to_query_string(), "?a=3&b=2");
	}

	#[test]
	fn test_insert_first_keeps_existing() {
		let mut query = Query::new();
		query.insert_first("a".to_string(), "1".to_string());
		query.insert_first("a".to_string(), "2".to_string());
		assert_eq!(query.get("a"), Some("1"));
		assert_eq!(query.len(), 1);
	}

	#[test]
	fn test_merge_overrides_and_appends() {
		let mut base: Query = [("page", "1"), ("sort", "name")].into_iter().collect();
		let extra: Query = [("page", "2"), ("filter", "new")].into_iter().collect();
		base.merge(&extra);
		assert_eq!(base.to_query_string(), "?page=2&sort=name&filter=new");
	}

	#[test]
	fn test_remove() {
		let mut query: Query = [("a", "1"), ("b", "2")].into_iter().collect();
		assert_eq!(query.remove("a"), Some("1".to_string()));
		assert_eq!(query.remove("a"), None);
		assert_eq!(query.to_query_string(), "?b=2");
	}

	#[test]
	fn test_empty_query_string() {
		assert_eq!(Query::new().to_query_string(), "");
	}
}
