#![no_main]

use libfuzzer_sys::fuzz_target;

use fieldmanual::lexer::CommandLexer;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let lexer = CommandLexer::new();
        let spans = lexer.highlight(input);

        // Spans must tile the input exactly, whatever the bytes were
        let concat: String = spans.iter().map(|span| span.text).collect();
        assert_eq!(concat, input);
    }
});
