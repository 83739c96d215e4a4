use logos::Logos;

/// Represents a lexical token in the source input.
///
/// Keywords are matched without regard to case, so `PRINT`, `Print` and
/// `print` are the same token. Identifiers keep the spelling they were written
/// with.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literals such as `3.14` or `2.5e3`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    Real(f64),
    /// Integer literals such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Clock literals `H:MM` and `H:MM:SS`.
    #[regex(r"[0-9]{1,2}:[0-9]{2}(:[0-9]{2})?", parse_clock)]
    Clock(ClockTime),
    /// String literals in single or double quotes.
    #[regex(r"'[^']*'", parse_string, allow_greedy = true)]
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Boolean literals `true` and `false`.
    #[token("true", |_| true, ignore(case))]
    #[token("false", |_| false, ignore(case))]
    Bool(bool),

    /// `and`
    #[token("and", ignore(case))]
    And,
    /// `or`
    #[token("or", ignore(case))]
    Or,
    /// `xor`
    #[token("xor", ignore(case))]
    Xor,
    /// `not`
    #[token("not", ignore(case))]
    Not,
    /// `in`
    #[token("in", ignore(case))]
    In,
    /// `like`
    #[token("like", ignore(case))]
    Like,
    /// `print`
    #[token("print", ignore(case))]
    Print,
    /// `if`
    #[token("if", ignore(case))]
    If,
    /// `else`
    #[token("else", ignore(case))]
    Else,
    /// `inside`
    #[token("inside", ignore(case))]
    Inside,
    /// `times`
    #[token("times", ignore(case))]
    Times,
    /// `while`
    #[token("while", ignore(case))]
    While,
    /// `break`
    #[token("break", ignore(case))]
    Break,
    /// `continue`
    #[token("continue", ignore(case))]
    Continue,
    /// `exit`
    #[token("exit", ignore(case))]
    Exit,
    /// `error`, stopping the program with a failure.
    #[token("error", ignore(case))]
    Fail,
    /// `where`
    #[token("where", ignore(case))]
    Where,
    /// `order`
    #[token("order", ignore(case))]
    Order,
    /// `by`
    #[token("by", ignore(case))]
    By,
    /// `asc`
    #[token("asc", ignore(case))]
    Asc,
    /// `desc`
    #[token("desc", ignore(case))]
    Desc,
    /// `skip`
    #[token("skip", ignore(case))]
    Skip,
    /// `every`
    #[token("every", ignore(case))]
    Every,
    /// `limit`
    #[token("limit", ignore(case))]
    Limit,
    /// `final`
    #[token("final", ignore(case))]
    Final,
    /// `force`
    #[token("force", ignore(case))]
    Force,
    /// `stack`
    #[token("stack", ignore(case))]
    Stack,
    /// `create`
    #[token("create", ignore(case))]
    Create,
    /// `createFile`
    #[token("createfile", ignore(case))]
    CreateFile,
    /// `createFiles`
    #[token("createfiles", ignore(case))]
    CreateFiles,
    /// `createDirectory`
    #[token("createdirectory", ignore(case))]
    CreateDirectory,
    /// `createDirectories`
    #[token("createdirectories", ignore(case))]
    CreateDirectories,
    /// `delete`
    #[token("delete", ignore(case))]
    Delete,
    /// `drop`
    #[token("drop", ignore(case))]
    Drop,
    /// `hide`
    #[token("hide", ignore(case))]
    Hide,
    /// `unhide`
    #[token("unhide", ignore(case))]
    Unhide,
    /// `lock`
    #[token("lock", ignore(case))]
    Lock,
    /// `unlock`
    #[token("unlock", ignore(case))]
    Unlock,
    /// `recreate`
    #[token("recreate", ignore(case))]
    Recreate,
    /// `reaccess`
    #[token("reaccess", ignore(case))]
    Reaccess,
    /// `remodify`
    #[token("remodify", ignore(case))]
    Remodify,
    /// `rechange`
    #[token("rechange", ignore(case))]
    Rechange,
    /// `rename`
    #[token("rename", ignore(case))]
    Rename,
    /// `move`
    #[token("move", ignore(case))]
    Move,
    /// `copy`
    #[token("copy", ignore(case))]
    Copy,
    /// `to`
    #[token("to", ignore(case))]
    To,
    /// `as`
    #[token("as", ignore(case))]
    As,

    /// Identifier tokens; variable, function, attribute, unit or month names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,

    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Equals,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// Line breaks separate statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Time of day written as `H:MM` or `H:MM:SS`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ClockTime {
    pub hour:   u32,
    pub minute: u32,
    /// `None` when the literal has no seconds part.
    pub second: Option<u32>,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Splits `H:MM[:SS]` into its parts, rejecting impossible clock values.
fn parse_clock(lex: &logos::Lexer<Token>) -> Option<ClockTime> {
    let mut parts = lex.slice().split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    let second = match parts.next() {
        Some(s) => Some(s.parse().ok()?),
        None => None,
    };

    if hour > 23 || minute > 59 || second.is_some_and(|s| s > 59) {
        return None;
    }
    Some(ClockTime { hour, minute, second })
}

/// Strips the quotes from a string literal and counts the line breaks inside.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    lex.extras.line += inner.matches('\n').count();
    inner.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer_with_extras(source, LexerExtras { line: 1 }).map(|t| t.unwrap())
                                                                 .collect()
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(lex("PRINT Where"), vec![Token::Print, Token::Where]);
        assert_eq!(lex("TRUE"), vec![Token::Bool(true)]);
        assert_eq!(lex("createFile CREATEDIRECTORIES"),
                   vec![Token::CreateFile, Token::CreateDirectories]);
    }

    #[test]
    fn longer_identifiers_are_not_keywords() {
        assert_eq!(lex("hidden locked"),
                   vec![Token::Identifier("hidden".to_string()),
                        Token::Identifier("locked".to_string())]);
        assert_eq!(lex("hide error"), vec![Token::Hide, Token::Fail]);
    }

    #[test]
    fn clocks_and_numbers() {
        assert_eq!(lex("10:11:12"),
                   vec![Token::Clock(ClockTime { hour:   10,
                                                 minute: 11,
                                                 second: Some(12), })]);
        assert_eq!(lex("9:05"),
                   vec![Token::Clock(ClockTime { hour:   9,
                                                 minute: 5,
                                                 second: None, })]);
        assert_eq!(lex("2.5 3"), vec![Token::Real(2.5), Token::Integer(3)]);
    }

    #[test]
    fn strings_keep_inner_text() {
        assert_eq!(lex("'a b' \"c'd\""),
                   vec![Token::Str("a b".to_string()), Token::Str("c'd".to_string())]);
    }

    #[test]
    fn compound_operators_win_over_single_characters() {
        assert_eq!(lex("a++ b+=1"),
                   vec![Token::Identifier("a".to_string()),
                        Token::PlusPlus,
                        Token::Identifier("b".to_string()),
                        Token::PlusAssign,
                        Token::Integer(1)]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(lex("print // note"), vec![Token::Print]);
    }
}
