use std::str::FromStr;

/// Selects which characters count as wildcards when comparing two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphabetMode {
    /// `N` and `X` match any base
    #[default]
    Nucleotide,
    /// `X` matches any residue
    AminoAcid,
    /// Exact matches only
    Strict,
}

impl AlphabetMode {
    /// Maps a single-character selector onto a mode. Anything other than
    /// `n` or `a` selects [`AlphabetMode::Strict`], so `r` and typos alike
    /// disable wildcards.
    pub fn from_selector(selector: u8) -> Self {
        match selector {
            b'n' => AlphabetMode::Nucleotide,
            b'a' => AlphabetMode::AminoAcid,
            _ => AlphabetMode::Strict,
        }
    }

    pub fn selector(&self) -> u8 {
        match self {
            AlphabetMode::Nucleotide => b'n',
            AlphabetMode::AminoAcid => b'a',
            AlphabetMode::Strict => b'r',
        }
    }

    pub fn wildcards(&self) -> &'static [u8] {
        match self {
            AlphabetMode::Nucleotide => b"NX",
            AlphabetMode::AminoAcid => b"X",
            AlphabetMode::Strict => b"",
        }
    }

    #[inline]
    pub fn is_wildcard(&self, base: u8) -> bool {
        match self {
            AlphabetMode::Nucleotide => base == b'N' || base == b'X',
            AlphabetMode::AminoAcid => base == b'X',
            AlphabetMode::Strict => false,
        }
    }

    #[inline]
    pub fn matches(&self, a: u8, b: u8) -> bool {
        a == b || self.is_wildcard(a) || self.is_wildcard(b)
    }
}

impl FromStr for AlphabetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes().first() {
            Some(&selector) => Ok(AlphabetMode::from_selector(selector)),
            None => Err("Alphabet selector cannot be an empty string".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_selector_known() {
        assert_eq!(AlphabetMode::from_selector(b'n'), AlphabetMode::Nucleotide);
        assert_eq!(AlphabetMode::from_selector(b'a'), AlphabetMode::AminoAcid);
        assert_eq!(AlphabetMode::from_selector(b'r'), AlphabetMode::Strict);
    }

    #[test]
    fn test_from_selector_unknown_is_strict() {
        for selector in [b'N', b'A', b'x', b' ', b'0'] {
            assert_eq!(AlphabetMode::from_selector(selector), AlphabetMode::Strict);
        }
    }

    #[test]
    fn test_selector_roundtrip() {
        for mode in [
            AlphabetMode::Nucleotide,
            AlphabetMode::AminoAcid,
            AlphabetMode::Strict,
        ] {
            assert_eq!(AlphabetMode::from_selector(mode.selector()), mode);
        }
    }

    #[test]
    fn test_from_str_uses_first_char() {
        assert_eq!("nucleotide".parse::<AlphabetMode>(), Ok(AlphabetMode::Nucleotide));
        assert_eq!("aa".parse::<AlphabetMode>(), Ok(AlphabetMode::AminoAcid));
        assert_eq!("random".parse::<AlphabetMode>(), Ok(AlphabetMode::Strict));
        assert!("".parse::<AlphabetMode>().is_err());
    }

    #[test]
    fn test_wildcards_agree_with_is_wildcard() {
        for mode in [
            AlphabetMode::Nucleotide,
            AlphabetMode::AminoAcid,
            AlphabetMode::Strict,
        ] {
            for base in 0..=u8::MAX {
                assert_eq!(mode.is_wildcard(base), mode.wildcards().contains(&base));
            }
        }
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        assert!(!AlphabetMode::Nucleotide.matches(b'n', b'A'));
        assert!(!AlphabetMode::AminoAcid.matches(b'x', b'A'));
        assert!(!AlphabetMode::Strict.matches(b'a', b'A'));
    }

    #[test]
    fn test_default_is_nucleotide() {
        assert_eq!(AlphabetMode::default(), AlphabetMode::Nucleotide);
    }
}
