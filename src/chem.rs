//! Molecule validity predicate.
//!
//! The pipeline treats chemistry as an opaque collaborator: anything
//! implementing [`MoleculeCheck`] can decide whether a molecule string is
//! loadable. The built-in [`SmilesSyntax`] checker performs a purely lexical
//! SMILES scan: it accepts strings that tokenize as SMILES and have balanced
//! branches, brackets and ring closures. It deliberately knows nothing about
//! valence or aromaticity; a full chemistry library plugs in at this trait.

/// Validity predicate for the mandatory molecule field.
pub trait MoleculeCheck {
    /// Return true when the molecule string is considered loadable.
    fn is_valid(&self, molecule: &str) -> bool;
}

/// Lexical SMILES syntax checker, the default predicate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmilesSyntax;

impl MoleculeCheck for SmilesSyntax {
    fn is_valid(&self, molecule: &str) -> bool {
        scan_smiles(molecule)
    }
}

/// Single-letter atoms of the SMILES organic subset, plus wildcard.
const ORGANIC_ATOMS: &[char] = &[
    'B', 'C', 'N', 'O', 'P', 'S', 'F', 'I', 'b', 'c', 'n', 'o', 'p', 's', '*',
];

const BOND_CHARS: &[char] = &['-', '=', '#', '$', ':', '/', '\\', '.'];

fn scan_smiles(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }

    let mut depth: i32 = 0;
    // Ring-bond digits toggle open/closed; all must be closed at the end.
    let mut open_rings = [false; 100];
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            '[' => {
                if !scan_bracket_atom(&mut chars) {
                    return false;
                }
            }
            ']' => return false,
            '%' => {
                // Two-digit ring closure: %NN
                let tens = chars.next().and_then(|c| c.to_digit(10));
                let ones = chars.next().and_then(|c| c.to_digit(10));
                match (tens, ones) {
                    (Some(t), Some(o)) => {
                        let ring = (t * 10 + o) as usize;
                        open_rings[ring] = !open_rings[ring];
                    }
                    _ => return false,
                }
            }
            '0'..='9' => {
                let ring = ch as usize - '0' as usize;
                open_rings[ring] = !open_rings[ring];
            }
            'C' if chars.peek() == Some(&'l') => {
                chars.next();
            }
            'B' if chars.peek() == Some(&'r') => {
                chars.next();
            }
            c if ORGANIC_ATOMS.contains(&c) => {}
            c if BOND_CHARS.contains(&c) => {}
            _ => return false,
        }
    }

    depth == 0 && !open_rings.iter().any(|open| *open)
}

/// Consume a bracket atom body up to and including `]`. The opening `[` has
/// already been consumed.
fn scan_bracket_atom(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut len = 0usize;
    for ch in chars.by_ref() {
        match ch {
            ']' => return len > 0,
            c if c.is_ascii_alphanumeric() => len += 1,
            '@' | '+' | '-' | '*' => len += 1,
            _ => return false,
        }
    }
    // Unterminated bracket.
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(s: &str) -> bool {
        SmilesSyntax.is_valid(s)
    }

    #[test]
    fn test_accepts_common_smiles() {
        assert!(valid("CCO"));
        assert!(valid("c1ccccc1"));
        assert!(valid("CC(=O)Oc1ccccc1C(=O)O"));
        assert!(valid("O=C(O)CN"));
        assert!(valid("ClCCl"));
        assert!(valid("BrC=CBr"));
        assert!(valid("[Na+].[Cl-]"));
        assert!(valid("C[C@H](N)C(=O)O"));
        assert!(valid("C%12CCCCC%12"));
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert!(!valid(""));
        assert!(!valid("not a molecule"));
        assert!(!valid("C;C"));
        assert!(!valid("hello?"));
    }

    #[test]
    fn test_rejects_unbalanced_structures() {
        assert!(!valid("CC(C"));
        assert!(!valid("CC)C"));
        assert!(!valid("C1CC"));
        assert!(!valid("[CH4"));
        assert!(!valid("C]"));
        assert!(!valid("[]C"));
        assert!(!valid("C%1C"));
    }
}
