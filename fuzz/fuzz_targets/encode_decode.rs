use std::str;

use honggfuzz::fuzz;
use segwit_addr::segwit::{self, Network};
use segwit_addr::{Hrp, ToBase32};

fn do_test(data: &[u8]) {
    if data.len() < 2 {
        return;
    }

    let hrp_end = (data[0] as usize) + 1;

    if data.len() < hrp_end {
        return;
    }

    let dp = &data[hrp_end..];

    let s = match str::from_utf8(&data[1..hrp_end]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let hrp = match Hrp::parse(s) {
        Ok(hrp) => hrp,
        Err(_) => return,
    };

    let fes = dp.to_base32();
    let address = segwit_addr::encode(&hrp, &fes);
    if address.len() <= segwit_addr::MAX_STRING_LENGTH {
        let (dec_hrp, dec_data) =
            segwit_addr::decode(&address).expect("should be able to decode own encoding");
        assert_eq!(dec_hrp, hrp);
        assert_eq!(dec_data, fes);
    }

    let witver = dp.first().map_or(0, |v| v % 17);
    let network = if data[1] & 1 == 0 { Network::Main } else { Network::Test };
    let addr = segwit::encode(network, witver, dp);
    match segwit::decode(network, &addr) {
        Ok((v, program)) => {
            assert_eq!(v, witver);
            assert_eq!(program, dp);
        }
        Err(_) => assert!(segwit_addr::primitives::segwit::validate_witness_program_length(
            dp.len(),
            witver
        )
        .is_err() || addr.len() > segwit_addr::MAX_STRING_LENGTH),
    }
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
