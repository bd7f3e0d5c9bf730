//! FIRST sets over a right-linear grammar.

use std::collections::{BTreeSet, HashSet};

use grammar::{Grammar, Symbol};

/// Resolves FIRST sets and epsilon chains on demand.
#[derive(Debug, Clone, Copy)]
pub struct FirstSets<'g> {
    grammar: &'g Grammar,
}

impl<'g> FirstSets<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        FirstSets { grammar }
    }

    /// Symbols that can begin some derivation of `sym`, including
    /// [`Symbol::EPSILON`] when `sym` derives the empty word. A terminal is
    /// its own FIRST set.
    pub fn first(&self, sym: Symbol) -> BTreeSet<Symbol> {
        let mut resolving = HashSet::new();
        self.first_guarded(sym, &mut resolving)
    }

    /// A symbol already being resolved contributes nothing, which cuts
    /// cycles such as `A -> B`, `B -> A`.
    fn first_guarded(&self, sym: Symbol, resolving: &mut HashSet<Symbol>) -> BTreeSet<Symbol> {
        let mut set = BTreeSet::new();
        if !self.grammar.is_non_terminal(sym) {
            set.insert(sym);
            return set;
        }
        if !resolving.insert(sym) {
            return set;
        }

        for production in self.grammar.alternatives(sym) {
            match production.first() {
                Some(head) if self.grammar.is_non_terminal(head) => {
                    set.extend(self.first_guarded(head, resolving));
                }
                Some(head) => {
                    set.insert(head);
                }
                None => {}
            }
        }

        resolving.remove(&sym);
        set
    }

    pub fn derives_epsilon(&self, sym: Symbol) -> bool {
        self.first(sym).contains(&Symbol::EPSILON)
    }

    /// The chain of non-terminals `sym = n0, n1, ..., nk` where each `n(i+1)`
    /// heads a production of `n(i)` and `nk` has a production starting with
    /// `target`. Productions are explored in declared order.
    ///
    /// Returns `None` when `target` is not in `first(sym)`.
    pub fn first_direct_path(&self, sym: Symbol, target: Symbol) -> Option<Vec<Symbol>> {
        if !self.first(sym).contains(&target) {
            return None;
        }
        let mut visited = HashSet::new();
        let mut path = self.path_guarded(sym, target, &mut visited)?;
        path.reverse();
        Some(path)
    }

    /// Builds the path back to front.
    fn path_guarded(
        &self,
        sym: Symbol,
        target: Symbol,
        visited: &mut HashSet<Symbol>,
    ) -> Option<Vec<Symbol>> {
        if !visited.insert(sym) {
            return None;
        }

        for production in self.grammar.alternatives(sym) {
            match production.first() {
                Some(head) if head == target => return Some(vec![sym]),
                Some(head) if self.grammar.is_non_terminal(head) => {
                    if let Some(mut path) = self.path_guarded(head, target, visited) {
                        path.push(sym);
                        return Some(path);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> BTreeSet<Symbol> {
        s.chars().map(Symbol).collect()
    }

    fn path(s: &str) -> Option<Vec<Symbol>> {
        Some(s.chars().map(Symbol).collect())
    }

    #[test]
    fn first_of_terminal_heads() {
        let g: Grammar = "G=({S,A},{a,b},{S->aA|bS\nA->a},S)".parse().unwrap();
        let first = FirstSets::new(&g);

        assert_eq!(first.first(Symbol('S')), set("ab"));
        assert_eq!(first.first(Symbol('A')), set("a"));
        assert_eq!(first.first(Symbol('a')), set("a"));
        assert!(!first.derives_epsilon(Symbol('S')));
    }

    #[test]
    fn first_through_unit_productions() {
        let g: Grammar = "G=({S,A,B},{a,b},{S->A|b\nA->B\nB->&|aB},S)"
            .parse()
            .unwrap();
        let first = FirstSets::new(&g);

        assert_eq!(first.first(Symbol('S')), set("&ab"));
        assert!(first.derives_epsilon(Symbol('A')));
        assert_eq!(first.first_direct_path(Symbol('S'), Symbol::EPSILON), path("SAB"));
        assert_eq!(first.first_direct_path(Symbol('B'), Symbol::EPSILON), path("B"));
        assert_eq!(first.first_direct_path(Symbol('S'), Symbol('b')), path("S"));
        assert_eq!(first.first_direct_path(Symbol('S'), Symbol('a')), path("SAB"));
    }

    #[test]
    fn first_terminates_on_cycles() {
        let g: Grammar = "G=({S,A},{a},{S->A|a\nA->S|&},S)".parse().unwrap();
        let first = FirstSets::new(&g);

        assert_eq!(first.first(Symbol('S')), set("&a"));
        assert_eq!(first.first(Symbol('A')), set("&a"));
        assert_eq!(first.first_direct_path(Symbol('S'), Symbol::EPSILON), path("SA"));
    }

    #[test]
    fn first_of_self_loop() {
        let g: Grammar = "G=({S},{a},{S->S},S)".parse().unwrap();
        let first = FirstSets::new(&g);

        assert!(first.first(Symbol('S')).is_empty());
        assert_eq!(first.first_direct_path(Symbol('S'), Symbol::EPSILON), None);
    }

    #[test]
    fn first_direct_path_absent_target() {
        let g: Grammar = "G=({S},{a,b},{S->aS|a},S)".parse().unwrap();
        let first = FirstSets::new(&g);

        assert_eq!(first.first_direct_path(Symbol('S'), Symbol::EPSILON), None);
        assert_eq!(first.first_direct_path(Symbol('S'), Symbol('b')), None);
    }
}
