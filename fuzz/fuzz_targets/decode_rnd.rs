use honggfuzz::fuzz;
use segwit_addr::segwit::{self, Network};

// Checks that we do not crash if passed random data while decoding, and that anything which
// decodes re-encodes to the lowercase input.
fn do_test(data: &[u8]) {
    let data_str = String::from_utf8_lossy(data);

    if let Ok((hrp, data)) = segwit_addr::decode(&data_str) {
        assert_eq!(segwit_addr::encode(&hrp, &data), data_str);
    }

    for &network in &[Network::Main, Network::Test] {
        if let Ok((witver, program)) = segwit::decode(network, &data_str) {
            assert_eq!(segwit::encode(network, witver, &program), data_str.to_lowercase());
            let script = segwit::output_script(witver, &program);
            assert_eq!(script[1] as usize, program.len());
        }
    }
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
