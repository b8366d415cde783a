use serde::{Deserialize, Serialize};

const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

/// Endpoint substrings that mark a non-production cluster.
const TEST_CLUSTER_MARKERS: &[&str] = &["devnet", "testnet", "localhost"];

/// The network a transaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    Devnet,
    MainnetBeta,
}

impl Cluster {
    /// Classify an RPC endpoint descriptor. Anything not recognisably a test
    /// endpoint, including an empty string, is production.
    pub fn infer_from_rpc(endpoint: &str) -> Cluster {
        let endpoint = endpoint.to_ascii_lowercase();
        if TEST_CLUSTER_MARKERS.iter().any(|m| endpoint.contains(m)) {
            Cluster::Devnet
        } else {
            Cluster::MainnetBeta
        }
    }

    pub fn is_test(self) -> bool {
        self == Cluster::Devnet
    }

    fn query_suffix(self) -> &'static str {
        match self {
            Cluster::Devnet => "?cluster=devnet",
            Cluster::MainnetBeta => "",
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cluster::Devnet => write!(f, "devnet"),
            Cluster::MainnetBeta => write!(f, "mainnet-beta"),
        }
    }
}

pub fn explorer_tx_url(signature: &str, cluster: Cluster) -> String {
    format!("{EXPLORER_BASE_URL}/tx/{signature}{}", cluster.query_suffix())
}

pub fn explorer_address_url(address: &str, cluster: Cluster) -> String {
    format!("{EXPLORER_BASE_URL}/address/{address}{}", cluster.query_suffix())
}
