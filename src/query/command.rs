//! Lexer for the space-delimited dispatch grammar.

use crate::types::ParseError;

/// Parsed dispatch command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `select * from <collection>`
    SelectAll { collection: String },

    /// `select * from <collection> where <field> == <id>`
    SelectOne { collection: String, id: String },

    /// `insert into <collection>` (fields travel in the payload)
    Insert { collection: String },

    /// `update <collection> where <field> == <id>` (fields in the payload)
    Update { collection: String, id: String },

    /// `delete from <collection> where <field> == <id>`
    Delete { collection: String, id: String },
}

impl Command {
    /// Parse a dispatch sentence.
    ///
    /// Tokens are separated by single spaces with no quoting or
    /// escaping, so a space inside a value breaks the sentence apart.
    /// The verb and fixed keywords match case-insensitively; collection,
    /// field, and id tokens are taken verbatim. Trailing tokens are
    /// rejected.
    pub fn parse(sentence: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(sentence);

        let verb = tokens.name("a verb")?.to_ascii_lowercase();
        match verb.as_str() {
            "select" => {
                tokens.keyword("*")?;
                tokens.keyword("from")?;
                let collection = tokens.name("a collection name")?.to_string();

                if tokens.at_end() {
                    return Ok(Command::SelectAll { collection });
                }

                tokens.keyword("where")?;
                // the filter field is positional only; lookups are by id
                tokens.name("a field name")?;
                tokens.keyword("==")?;
                let id = tokens.name("a document id")?.to_string();
                tokens.finish()?;

                Ok(Command::SelectOne { collection, id })
            }
            "insert" => {
                tokens.keyword("into")?;
                let collection = tokens.name("a collection name")?.to_string();
                tokens.finish()?;

                Ok(Command::Insert { collection })
            }
            "update" => {
                let collection = tokens.name("a collection name")?.to_string();
                tokens.keyword("where")?;
                tokens.name("a field name")?;
                tokens.keyword("==")?;
                let id = tokens.name("a document id")?.to_string();
                tokens.finish()?;

                Ok(Command::Update { collection, id })
            }
            "delete" => {
                tokens.keyword("from")?;
                let collection = tokens.name("a collection name")?.to_string();
                tokens.keyword("where")?;
                tokens.name("a field name")?;
                tokens.keyword("==")?;
                let id = tokens.name("a document id")?.to_string();
                tokens.finish()?;

                Ok(Command::Delete { collection, id })
            }
            _ => Err(ParseError::UnknownVerb(verb)),
        }
    }
}

/// Cursor over the space-delimited tokens of one sentence.
struct Tokens<'a> {
    rest: std::iter::Peekable<std::str::Split<'a, char>>,
}

impl<'a> Tokens<'a> {
    fn new(sentence: &'a str) -> Self {
        Self {
            rest: sentence.split(' ').peekable(),
        }
    }

    /// Next token, required non-empty.
    fn name(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        match self.rest.next() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ParseError::Incomplete(what)),
        }
    }

    /// Next token, required to match a fixed keyword.
    fn keyword(&mut self, expected: &'static str) -> Result<(), ParseError> {
        match self.rest.next() {
            Some(found) if found.eq_ignore_ascii_case(expected) => Ok(()),
            Some(found) => Err(ParseError::UnexpectedToken {
                expected,
                found: found.to_string(),
            }),
            None => Err(ParseError::Incomplete(expected)),
        }
    }

    fn at_end(&mut self) -> bool {
        self.rest.peek().is_none()
    }

    /// Require that the sentence has no trailing tokens.
    fn finish(&mut self) -> Result<(), ParseError> {
        match self.rest.next() {
            None => Ok(()),
            Some(found) => Err(ParseError::UnexpectedToken {
                expected: "end of sentence",
                found: found.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_all() {
        let command = Command::parse("select * from books").unwrap();
        assert_eq!(
            command,
            Command::SelectAll {
                collection: "books".to_string()
            }
        );
    }

    #[test]
    fn test_parse_select_one() {
        let command = Command::parse("select * from books where bookId == abc123").unwrap();
        assert_eq!(
            command,
            Command::SelectOne {
                collection: "books".to_string(),
                id: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_parse_insert() {
        let command = Command::parse("insert into books").unwrap();
        assert_eq!(
            command,
            Command::Insert {
                collection: "books".to_string()
            }
        );
    }

    #[test]
    fn test_parse_update() {
        let command = Command::parse("update books where bookId == abc123").unwrap();
        assert_eq!(
            command,
            Command::Update {
                collection: "books".to_string(),
                id: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_parse_delete() {
        let command = Command::parse("delete from books where bookId == abc123").unwrap();
        assert_eq!(
            command,
            Command::Delete {
                collection: "books".to_string(),
                id: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_verb_and_keywords_are_case_insensitive() {
        let command = Command::parse("SELECT * FROM books WHERE bookId == abc123").unwrap();
        assert!(matches!(command, Command::SelectOne { .. }));
    }

    #[test]
    fn test_collection_case_is_preserved() {
        let command = Command::parse("insert into Books").unwrap();
        assert_eq!(
            command,
            Command::Insert {
                collection: "Books".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_verb() {
        let err = Command::parse("frobnicate foo").unwrap_err();
        assert_eq!(err, ParseError::UnknownVerb("frobnicate".to_string()));
    }

    #[test]
    fn test_mismatched_keyword() {
        let err = Command::parse("delete of books where bookId == x").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "from",
                found: "of".to_string()
            }
        );
    }

    #[test]
    fn test_double_space_breaks_the_sentence() {
        // two spaces produce an empty token at the collection position
        let err = Command::parse("insert into  books").unwrap_err();
        assert_eq!(err, ParseError::Incomplete("a collection name"));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = Command::parse("insert into books extra").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "end of sentence",
                found: "extra".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_sentence() {
        let err = Command::parse("update books where bookId ==").unwrap_err();
        assert_eq!(err, ParseError::Incomplete("a document id"));
    }

    #[test]
    fn test_empty_sentence() {
        let err = Command::parse("").unwrap_err();
        assert_eq!(err, ParseError::Incomplete("a verb"));
    }
}
