use grammar::Symbol;

/// Keep track of a position within a word, updating on successful matches.
#[derive(Debug, Clone)]
pub struct Position<'a> {
    pub input: &'a [Symbol],
    pub idx: usize,
}

impl<'a> Position<'a> {
    pub fn new(input: &'a [Symbol]) -> Self {
        Position { input, idx: 0 }
    }

    /// Check if `sym` is the symbol at the current index. The index will be
    /// updated on match.
    pub fn match_symbol(&mut self, sym: Symbol) -> bool {
        if self.peek() == Some(sym) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    pub fn peek(&self) -> Option<Symbol> {
        self.input.get(self.idx).copied()
    }

    pub fn is_at_end(&self) -> bool {
        self.idx >= self.input.len()
    }

    pub fn checkpoint(&self) -> usize {
        self.idx
    }

    /// Move back to a previously taken checkpoint.
    pub fn rewind(&mut self, checkpoint: usize) {
        debug_assert!(checkpoint <= self.idx);
        self.idx = checkpoint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(s: &str) -> Vec<Symbol> {
        s.chars().map(Symbol).collect()
    }

    #[test]
    fn position_match_symbol_simple() {
        let tests = vec![
            ("", 'a', false),
            ("hello", 'w', false),
            ("hello", 'h', true),
            ("hello", 'e', false),
        ];
        for test in tests {
            let input = syms(test.0);
            let mut c = Position::new(&input);
            let got = c.match_symbol(Symbol(test.1));
            assert_eq!(got, test.2, "test case: {:?}", test);
        }
    }

    #[test]
    fn position_match_idx_multiple() {
        let input = syms("ab");
        let mut c = Position::new(&input);
        assert!(c.match_symbol(Symbol('a')));
        assert!(c.match_symbol(Symbol('b')), "cursor: {:?}", c);
        assert!(c.is_at_end());
        assert_eq!(c.peek(), None);
    }

    #[test]
    fn position_rewind() {
        let input = syms("abc");
        let mut c = Position::new(&input);
        let checkpoint = c.checkpoint();
        assert!(c.match_symbol(Symbol('a')));
        assert!(c.match_symbol(Symbol('b')));
        c.rewind(checkpoint);
        assert_eq!(c.idx, 0);
        assert_eq!(c.peek(), Some(Symbol('a')));
    }
}
