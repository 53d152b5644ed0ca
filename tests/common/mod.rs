use segwit_addr::segwit::{self, Network};

/// Decodes `addr` under whichever network accepts it, mainnet first.
pub fn decode_any_network(addr: &str) -> Option<(Network, u8, Vec<u8>)> {
    [Network::Main, Network::Test]
        .iter()
        .find_map(|&network| segwit::decode(network, addr).ok().map(|(v, p)| (network, v, p)))
}
