use polyglot_lexer::{Language, LexError, Lexer, SymbolSet, Token, TokenKind};
use proptest::prelude::*;

const LANGUAGES: [Language; 3] = [Language::Cpp, Language::Basic, Language::Pascal];

fn symbols() -> SymbolSet {
    [">", ">>", ">>=", "=", "==", "+", "-", "*", "/", ";", ",", "(", ")", "."]
        .into_iter()
        .collect()
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cpp_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,8}",
        "[1-9][0-9]{0,6}",
        "0x[0-9a-f]{1,6}",
        "\"[a-z ]{0,8}\"",
        prop::sample::select(vec![">>=", "==", "+", ";", "(", ")", ","]).prop_map(String::from),
    ]
}

/// Pulls tokens until EOF, failing if the lexer stops making progress
fn drain<'a>(lexer: &mut Lexer<'a>, budget: usize) -> Vec<Result<Token<'a>, LexError>> {
    let mut results = Vec::new();
    for _ in 0..budget {
        match lexer.next_token() {
            Ok(token) if token.is_eof() => return results,
            result => results.push(result),
        }
    }
    panic!("lexer did not reach EOF within {budget} calls");
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_property_whitespace_only_input() {
        proptest!(|(input in "[ \t\r\n]{0,40}")| {
            for language in LANGUAGES {
                let mut lexer = Lexer::new(&input, "ws", language, symbols());
                let token = lexer.next_token().unwrap();
                assert!(token.is_eof());
                let newlines = input.matches('\n').count() as u32;
                assert_eq!(token.line, 1 + newlines);
                assert_eq!(token.offset, input.len());
            }
        });
    }

    #[test]
    fn test_property_cpp_token_sequences() {
        init_logging();
        proptest!(|(pieces in prop::collection::vec(cpp_token(), 0..24))| {
            let source = pieces.join(" ");
            let lexemes: Vec<_> = Lexer::new(&source, "gen.cpp", Language::Cpp, symbols())
                .map(|token| token.unwrap().lexeme)
                .collect();
            assert_eq!(lexemes, pieces.iter().map(String::as_str).collect::<Vec<_>>());
        });
    }

    #[test]
    fn test_property_longest_match_on_runs() {
        proptest!(|(count in 1usize..16)| {
            let source = ">".repeat(count);
            let lexemes: Vec<_> = Lexer::new(&source, "gt", Language::Cpp, symbols())
                .map(|token| token.unwrap().lexeme)
                .collect();
            assert_eq!(lexemes.len(), count.div_ceil(2));
            assert!(lexemes[..count / 2].iter().all(|lexeme| *lexeme == ">>"));
            if count % 2 == 1 {
                assert_eq!(lexemes.last(), Some(&">"));
            }
        });
    }

    #[test]
    fn test_property_freeform_nesting() {
        proptest!(|(depth in 1usize..8, body in "[a-z ]{0,10}")| {
            let region = format!("{}{}{}", "[{ ".repeat(depth), body, " }]".repeat(depth));
            let source = format!("x = {region} + y");
            let tokens: Vec<_> = Lexer::new(&source, "t.bas", Language::Basic, symbols())
                .map(|token| token.unwrap())
                .collect();
            assert_eq!(tokens[2].kind, TokenKind::FreeForm);
            assert_eq!(tokens[2].lexeme, region);
            assert_eq!(tokens.last().map(|token| token.lexeme), Some("y"));

            let unbalanced = format!("{}{}{}", "[{ ".repeat(depth + 1), body, " }]".repeat(depth));
            let mut lexer = Lexer::new(&unbalanced, "t.bas", Language::Basic, symbols());
            let error = lexer.next_token().unwrap_err();
            assert_eq!(error.message(), "unterminated free-form block");
            assert!(lexer.next_token().unwrap().is_eof());
        });
    }

    #[test]
    fn test_property_arbitrary_input_terminates() {
        init_logging();
        proptest!(|(input in "\\PC{0,64}")| {
            for language in LANGUAGES {
                let mut lexer = Lexer::new(&input, "any", language, symbols());
                let results = drain(&mut lexer, input.len() + 1);
                assert!(results.len() <= input.len());
                assert!(lexer.next_token().unwrap().is_eof());
            }
        });
    }

    #[test]
    fn test_property_lines_never_decrease() {
        proptest!(|(input in "[a-z0-9 \n;=+]{0,80}")| {
            for language in LANGUAGES {
                let mut lexer = Lexer::new(&input, "lines", language, symbols());
                let results = drain(&mut lexer, input.len() + 1);
                let lines: Vec<u32> = results.iter().filter_map(|result| {
                    result.as_ref().ok().map(|token| token.line)
                }).collect();
                assert!(lines.windows(2).all(|pair| pair[0] <= pair[1]));
            }
        });
    }
}
