pub use codespan_reporting::files::SimpleFile;

pub type Span = std::ops::Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }

    pub fn as_ref(&self) -> Spanned<&T> {
        Spanned {
            value: &self.value,
            span: self.span.clone(),
        }
    }
}

pub type SourceFile = SimpleFile<String, String>;

/// Smallest span covering both `a` and `b`
pub fn cover(a: &Span, b: &Span) -> Span {
    a.start.min(b.start)..a.end.max(b.end)
}

/// Whether `inner` lies entirely within `outer`
pub fn contains(outer: &Span, inner: &Span) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// Whether two spans share at least one byte
pub fn overlaps(a: &Span, b: &Span) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanned() {
        let spanned = Spanned::new(42, 0..2);
        assert_eq!(spanned.value, 42);
        assert_eq!(spanned.span, 0..2);
    }

    #[test]
    fn test_map() {
        let spanned = Spanned::new("x", 3..4).map(str::len);
        assert_eq!(spanned.value, 1);
        assert_eq!(spanned.span, 3..4);
    }

    #[test]
    fn test_cover_and_contains() {
        assert_eq!(cover(&(4..6), &(1..3)), 1..6);
        assert!(contains(&(0..10), &(2..10)));
        assert!(!contains(&(2..10), &(0..3)));
    }

    #[test]
    fn test_overlaps_is_exclusive_at_the_edges() {
        assert!(overlaps(&(0..5), &(4..8)));
        assert!(!overlaps(&(0..4), &(4..8)));
    }
}
