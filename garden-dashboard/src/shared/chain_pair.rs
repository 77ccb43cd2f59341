//! Chain-pair classification
//!
//! Every dataset is split into Bitcoin-related and other chain pairs using a
//! single rule: the lowercase key contains "bitcoin".

use indexmap::IndexMap;

/// Which side of the Bitcoin split a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    NonBitcoin,
    Bitcoin,
}

impl Network {
    /// Prefix used in section titles and placeholder messages
    pub fn prefix(&self) -> &'static str {
        match self {
            Network::Bitcoin => "Bitcoin ",
            Network::NonBitcoin => "",
        }
    }
}

/// Returns true if the chain pair involves Bitcoin
pub fn is_bitcoin_pair(chain_pair: &str) -> bool {
    chain_pair.to_lowercase().contains("bitcoin")
}

/// Chain-pair keys of one mapping, split by [`is_bitcoin_pair`]
///
/// Both sides keep the mapping's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainPartition<'a> {
    pub bitcoin: Vec<&'a str>,
    pub non_bitcoin: Vec<&'a str>,
}

impl<'a> ChainPartition<'a> {
    /// Keys on the requested side of the split
    pub fn select(&self, network: Network) -> &[&'a str] {
        match network {
            Network::Bitcoin => &self.bitcoin,
            Network::NonBitcoin => &self.non_bitcoin,
        }
    }
}

/// Split the keys of an optional mapping. An absent mapping yields two empty sides.
pub fn partition<V>(data: Option<&IndexMap<String, V>>) -> ChainPartition<'_> {
    let Some(data) = data else {
        return ChainPartition::default();
    };

    let (bitcoin, non_bitcoin): (Vec<&str>, Vec<&str>) = data
        .keys()
        .map(String::as_str)
        .partition(|chain_pair| is_bitcoin_pair(chain_pair));

    ChainPartition {
        bitcoin,
        non_bitcoin,
    }
}
