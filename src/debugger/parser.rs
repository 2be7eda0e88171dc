// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::mem;

enum ParseState {
    ScanningForArguments,
    ScanningArgument,
    ScanningQuotedArgument,
}

/// Returns true if the character passed is a whitespace character. Both spaces
/// and tabs are considered whitespace characters.
fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Returns true if the character passed is a quote.
fn is_quote(c: char) -> bool {
    c == '"'
}

fn is_escape(c: char) -> bool {
    c == '\\'
}

/// Parses raw command-line input into a list of separate arguments. Arguments
/// are separated by whitespace, can be quoted, and can have escaped characters
/// inside of them. Quoted and unquoted text with no whitespace in between
/// form a single argument, the way shells treat them.
pub fn parse_raw_input(input: &str) -> Result<Vec<String>, &'static str> {
    let mut state = ParseState::ScanningForArguments;
    let mut args: Vec<String> = Vec::new();
    let mut arg = String::new();
    let mut escaped = false;

    for c in input.chars() {
        // Escaped characters are taken literally in every state.
        if escaped {
            arg.push(c);
            escaped = false;
            continue;
        }

        match state {
            ParseState::ScanningForArguments => {
                if is_quote(c) {
                    state = ParseState::ScanningQuotedArgument;
                } else if is_escape(c) {
                    state = ParseState::ScanningArgument;
                    escaped = true;
                } else if !is_whitespace(c) {
                    state = ParseState::ScanningArgument;
                    arg.push(c);
                }
            },
            ParseState::ScanningArgument => {
                // Switch back to scanning if whitespace is encountered and push
                // the argument currently being parsed to the argument list.
                if is_whitespace(c) {
                    args.push(mem::replace(&mut arg, String::new()));
                    state = ParseState::ScanningForArguments;
                } else if is_quote(c) {
                    state = ParseState::ScanningQuotedArgument;
                } else if is_escape(c) {
                    escaped = true;
                } else {
                    arg.push(c);
                }
            },
            ParseState::ScanningQuotedArgument => {
                if is_quote(c) {
                    state = ParseState::ScanningArgument;
                } else if is_escape(c) {
                    escaped = true;
                } else {
                    arg.push(c);
                }
            },
        }
    }

    if escaped {
        return Err("nothing to escape at end of input");
    }

    match state {
        ParseState::ScanningQuotedArgument => Err("quoted arg does not close"),
        ParseState::ScanningArgument => {
            args.push(arg);
            Ok(args)
        },
        ParseState::ScanningForArguments => Ok(args),
    }
}
