//! Minimal shell-style glob matching.
//!
//! Only two wildcards are special:
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//!
//! Every other character, including `[`, `.` and `\`, matches itself.
//! Matching is case-sensitive and always covers the whole subject.

use std::fmt;

/// A compiled glob pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Glob {
    source: String,
    chars: Vec<char>,
    literal: bool,
}

impl Glob {
    /// Compile a pattern. Compilation cannot fail.
    pub fn new(pattern: impl Into<String>) -> Self {
        let source = pattern.into();
        let chars: Vec<char> = source.chars().collect();
        let literal = !chars.iter().any(|&c| c == '*' || c == '?');
        Self {
            source,
            chars,
            literal,
        }
    }

    /// The pattern text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern contains no wildcards.
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// Test `subject` against this pattern.
    pub fn matches(&self, subject: &str) -> bool {
        if self.literal {
            return self.source == subject;
        }

        let pat = &self.chars;
        let subject: Vec<char> = subject.chars().collect();

        let (mut p, mut s) = (0, 0);
        // Position of the last `*` seen, and the subject index it is currently absorbing up to.
        let mut backtrack: Option<(usize, usize)> = None;

        while s < subject.len() {
            match pat.get(p) {
                Some('*') => {
                    backtrack = Some((p, s));
                    p += 1;
                }
                Some(&c) if c == '?' || c == subject[s] => {
                    p += 1;
                    s += 1;
                }
                _ => match backtrack {
                    Some((star, consumed)) => {
                        p = star + 1;
                        s = consumed + 1;
                        backtrack = Some((star, consumed + 1));
                    }
                    None => return false,
                },
            }
        }

        pat[p..].iter().all(|&c| c == '*')
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Glob {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Glob {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(p: &str, s: &str) -> bool {
        Glob::new(p).matches(s)
    }

    #[test]
    fn test_literal() {
        assert!(glob("armv7l", "armv7l"));
        assert!(!glob("armv7l", "armv7"));
        assert!(!glob("armv7l", "armv7l "));
        assert!(!glob("arm", "armv6l")); // no substring match
        assert!(!glob("x86_64", "X86_64"));
    }

    #[test]
    fn test_star() {
        assert!(glob("armv8*", "armv8"));
        assert!(glob("armv8*", "armv8l"));
        assert!(glob("armv8*", "armv8-a+crypto"));
        assert!(!glob("armv8*", "armv7l"));
        assert!(!glob("armv8*", "xarmv8"));
        assert!(glob("*64", "aarch64"));
        assert!(glob("*", ""));
        assert!(glob("**", "anything"));
    }

    #[test]
    fn test_star_backtracking() {
        assert!(glob("a*b*c", "axxbyyc"));
        assert!(glob("a*bc", "abcbc"));
        assert!(!glob("a*b", "ab_"));
        assert!(glob("*aa", "aaa"));
    }

    #[test]
    fn test_question_mark() {
        assert!(glob("armv?l", "armv6l"));
        assert!(glob("armv?l", "armv7l"));
        assert!(!glob("armv?l", "armvl"));
        assert!(!glob("armv?l", "armv10l"));
        assert!(glob("?", "é"));
    }

    #[test]
    fn test_empty() {
        assert!(glob("", ""));
        assert!(!glob("", "x86_64"));
        assert!(!glob("?", ""));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(glob("x86.64", "x86.64"));
        assert!(!glob("x86.64", "x86_64"));
        assert!(glob("[arm]", "[arm]"));
        assert!(!glob("[arm]", "a"));
        assert!(!glob("arm+", "armm"));
    }

    #[test]
    fn test_is_literal() {
        assert!(Glob::new("aarch64").is_literal());
        assert!(!Glob::new("armv8*").is_literal());
        assert!(!Glob::new("armv?l").is_literal());
        assert_eq!(Glob::new("armv8*").to_string(), "armv8*");
    }

    #[test]
    fn test_compiled_glob_reused() {
        let literal = Glob::from(String::from("aarch64"));
        let wild = Glob::from("arm*");
        for _ in 0..2 {
            assert!(literal.matches("aarch64"));
            assert!(!literal.matches("aarch6"));
            assert!(wild.matches("armv7l"));
            assert!(!wild.matches("aarch64"));
        }
        assert_eq!(literal.clone(), literal);
        assert!(literal.is_literal());
    }
}
