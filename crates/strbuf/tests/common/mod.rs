#![allow(missing_docs, dead_code)]

use strbuf::ByteString;

pub const PARSER_INPUT: &str = "let answer = 42;";

/// A text the size of a small source file, with a repeated key to rewrite.
pub fn document(lines: usize) -> String {
    let mut out = String::new();
    for i in 0..lines {
        out.push_str("rose number ");
        out.push_str(&i.to_string());
        out.push_str(" is a rose\n");
    }
    out
}

pub fn owned(text: &str) -> ByteString {
    ByteString::init_from(text).expect("allocation")
}
