use std::collections::HashMap;

/// Maps an exchange ticker to the identifier a provider keys its data on.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, symbol: &str) -> String;
}

/// A fixed ticker -> id table, usually loaded from the `[symbol_ids]` config section.
///
/// Unknown tickers resolve to their lowercase form, which is what most
/// providers use for the long tail of assets.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolMap {
    ids: HashMap<String, String>,
}

impl StaticSymbolMap {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let ids = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_uppercase(), v.into()))
            .collect();
        Self { ids }
    }
}

impl SymbolResolver for StaticSymbolMap {
    fn resolve(&self, symbol: &str) -> String {
        let key = symbol.trim().to_uppercase();
        match self.ids.get(&key) {
            Some(id) => id.clone(),
            None => key.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ticker_resolves_case_insensitively() {
        let map = StaticSymbolMap::new([("btc", "bitcoin"), ("SOL", "solana")]);
        assert_eq!(map.resolve("BTC"), "bitcoin");
        assert_eq!(map.resolve(" sol "), "solana");
    }

    #[test]
    fn unknown_ticker_falls_back_to_lowercase() {
        let map = StaticSymbolMap::default();
        assert_eq!(map.resolve("PEPE"), "pepe");
    }
}
