#![no_main]

use fsig_cli::{format_signal, parse_signals};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(signals) = parse_signals(text) else {
        return;
    };
    for signal in signals {
        let printed = format_signal(&signal, 5);
        let reparsed = parse_signals(&printed).expect("printed signal parses");
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed[0].len(), signal.len());
    }
});
