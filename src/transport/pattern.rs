// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{TransportError, TransportResult};

/// Glob-style channel pattern over dot-separated segments.
///
/// `*` matches any run of characters inside one segment and never crosses a
/// `.`, so `jobs.*.status` matches `jobs.abc.status` but not
/// `jobs.a.b.status`. Patterns are not regular expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPattern {
    raw: String,
    segments: Vec<String>,
}

impl ChannelPattern {
    pub fn parse(pattern: &str) -> TransportResult<Self> {
        if pattern.is_empty() {
            return Err(TransportError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern is empty".to_string(),
            });
        }
        let segments: Vec<String> = pattern.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(TransportError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern contains an empty segment".to_string(),
            });
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, channel: &str) -> bool {
        let mut parts = channel.split('.');
        for segment in &self.segments {
            match parts.next() {
                Some(part) if segment_matches(segment.as_bytes(), part.as_bytes()) => {}
                _ => return false,
            }
        }
        parts.next().is_none()
    }
}

/// Single-segment glob match with `*` wildcards, iterative with backtracking
/// to the most recent star.
fn segment_matches(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((sp, st)) = star {
            p = sp + 1;
            t = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching_table() {
        struct TestCase {
            pattern: &'static str,
            channel: &'static str,
            expected: bool,
        }

        let cases = vec![
            TestCase { pattern: "jobs.*.status", channel: "jobs.abc.status", expected: true },
            TestCase { pattern: "jobs.*.status", channel: "jobs.xyz.status", expected: true },
            TestCase { pattern: "jobs.*.status", channel: "other.abc.status", expected: false },
            TestCase { pattern: "jobs.*.status", channel: "jobs.a.b.status", expected: false },
            TestCase { pattern: "jobs.*.status", channel: "jobs.abc.cfg", expected: false },
            TestCase { pattern: "jobs.*.status", channel: "jobs.abc", expected: false },
            TestCase { pattern: "jobs.abc.cfg", channel: "jobs.abc.cfg", expected: true },
            TestCase { pattern: "jobs.a*c.cfg", channel: "jobs.abbc.cfg", expected: true },
            TestCase { pattern: "jobs.a*c.cfg", channel: "jobs.abd.cfg", expected: false },
            TestCase { pattern: "*", channel: "jobs", expected: true },
            TestCase { pattern: "*", channel: "jobs.abc", expected: false },
        ];

        for case in cases {
            let pattern = ChannelPattern::parse(case.pattern).unwrap();
            assert_eq!(
                pattern.matches(case.channel),
                case.expected,
                "pattern '{}' against '{}'",
                case.pattern,
                case.channel
            );
        }
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        assert!(ChannelPattern::parse("").is_err());
        assert!(ChannelPattern::parse("jobs..status").is_err());
        assert!(ChannelPattern::parse("jobs.*.").is_err());
    }
}
