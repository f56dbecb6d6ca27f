//! Event-based parsing infrastructure
//!
//! Parsers do not build syntax trees directly. They emit events that are
//! later replayed into a rowan tree by a [`TreeBuilder`].
//!
//! # Architecture
//!
//! 1. Parser emits events (StartNode, AddToken, FinishNode) to an EventSink
//! 2. EventSink collects events in a Vec
//! 3. TreeBuilder consumes events and source text to build the final syntax tree
//!
//! The parser only ever sees significant tokens. The tree builder restores
//! everything in between (whitespace, comments, unparsed text) from the
//! source, so the resulting tree is lossless and every node's text range
//! starts at its first significant token.

use terse_lexer::{lex, Token};
use terse_span::Span;
use terse_syntax_tree::{GreenNodeBuilder, SyntaxKind, SyntaxNode};

/// Events emitted during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a new syntax node
    StartNode(SyntaxKind),
    /// Add a token to the current node
    AddToken(SyntaxKind, Span),
    /// Finish the current syntax node
    FinishNode,
    /// A parse error occurred
    Error { message: String, span: Option<Span> },
}

/// Collects events during parsing
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    events: Vec<Event>,
}

impl EventSink {
    /// Create a new empty event sink
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Start a new syntax node
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.events.push(Event::StartNode(kind));
    }

    /// Add a token to the current node
    pub fn add_token(&mut self, kind: SyntaxKind, span: Span) {
        self.events.push(Event::AddToken(kind, span));
    }

    /// Finish the current syntax node
    pub fn finish_node(&mut self) {
        self.events.push(Event::FinishNode);
    }

    /// Record a parse error without location
    pub fn error(&mut self, message: String) {
        self.events.push(Event::Error { message, span: None });
    }

    /// Record a parse error at a span
    pub fn error_at(&mut self, message: String, span: Span) {
        self.events.push(Event::Error {
            message,
            span: Some(span),
        });
    }

    /// Get the collected events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the sink and return the events
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Builds a lossless syntax tree from events and source text
pub struct TreeBuilder<'src> {
    source: &'src str,
    events: Vec<Event>,
    pos: usize,
    /// Byte offset up to which source text has been attached to the tree
    cursor: usize,
    depth: usize,
}

impl<'src> TreeBuilder<'src> {
    /// Create a new tree builder
    pub fn new(source: &'src str, events: Vec<Event>) -> Self {
        Self {
            source,
            events,
            pos: 0,
            cursor: 0,
            depth: 0,
        }
    }

    /// Build the syntax tree from events
    pub fn build(mut self) -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        self.process_events(&mut builder);
        let green = builder.finish();
        SyntaxNode::new_root(green)
    }

    /// Process all events and build the tree
    fn process_events(&mut self, builder: &mut GreenNodeBuilder) {
        while self.pos < self.events.len() {
            match self.events[self.pos].clone() {
                Event::StartNode(kind) => {
                    if self.depth == 0 {
                        builder.start_node(kind.into());
                    } else {
                        // leading trivia belongs to the parent, not the new node
                        if let Some(start) = self.next_token_start() {
                            self.fill_gap(builder, start);
                        }
                        builder.start_node(kind.into());
                    }
                    self.depth += 1;
                }
                Event::AddToken(kind, span) => {
                    self.fill_gap(builder, span.start);
                    builder.token(kind.into(), &self.source[span.clone()]);
                    self.cursor = span.end;
                }
                Event::FinishNode => {
                    if self.depth == 1 {
                        self.fill_gap(builder, self.source.len());
                    }
                    builder.finish_node();
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Error { .. } => {
                    // Errors are extracted from the event list separately
                }
            }
            self.pos += 1;
        }
    }

    /// Start offset of the next token event
    fn next_token_start(&self) -> Option<usize> {
        self.events[self.pos..].iter().find_map(|event| match event {
            Event::AddToken(_, span) => Some(span.start),
            _ => None,
        })
    }

    /// Attach source text between the cursor and `until` as trivia or error tokens
    fn fill_gap(&mut self, builder: &mut GreenNodeBuilder, until: usize) {
        if until <= self.cursor {
            return;
        }
        let base = self.cursor;
        let gap = &self.source[base..until];
        for piece in lex(gap) {
            let (kind, span) = match piece {
                Ok(spanned) if spanned.value.is_trivia() => {
                    (SyntaxKind::from(spanned.value), spanned.span)
                }
                Ok(spanned) => (SyntaxKind::Error, spanned.span),
                Err(spanned) => (SyntaxKind::Error, spanned.span),
            };
            builder.token(kind.into(), &gap[span]);
        }
        self.cursor = until;
    }
}

/// Whether a token is handed to the parser
pub fn is_significant(token: &Token) -> bool {
    !token.is_trivia()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sink() {
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::NameRef);
        sink.add_token(SyntaxKind::Identifier, 0..1);
        sink.finish_node();

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Event::StartNode(SyntaxKind::NameRef));
        assert_eq!(events[1], Event::AddToken(SyntaxKind::Identifier, 0..1));
        assert_eq!(events[2], Event::FinishNode);
    }

    #[test]
    fn test_tree_builder_restores_trivia() {
        let source = "  a /* c */ . b  ";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::FieldAccessExpr);
        sink.start_node(SyntaxKind::NameRef);
        sink.add_token(SyntaxKind::Identifier, 2..3);
        sink.finish_node();
        sink.add_token(SyntaxKind::Dot, 12..13);
        sink.add_token(SyntaxKind::Identifier, 14..15);
        sink.finish_node();

        let tree = TreeBuilder::new(source, sink.into_events()).build();

        assert_eq!(tree.text().to_string(), source);
        let name = tree.first_child().unwrap();
        assert_eq!(name.kind(), SyntaxKind::NameRef);
        assert_eq!(name.text_range().start(), 2.into());
        assert_eq!(name.text().to_string(), "a");
    }

    #[test]
    fn test_tree_builder_nested_leading_trivia_stays_outside() {
        let source = "x =  y";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::AssignmentExpr);
        sink.start_node(SyntaxKind::NameRef);
        sink.add_token(SyntaxKind::Identifier, 0..1);
        sink.finish_node();
        sink.add_token(SyntaxKind::Eq, 2..3);
        sink.start_node(SyntaxKind::NameRef);
        sink.add_token(SyntaxKind::Identifier, 5..6);
        sink.finish_node();
        sink.finish_node();

        let tree = TreeBuilder::new(source, sink.into_events()).build();
        let rhs = tree.children().nth(1).unwrap();
        assert_eq!(rhs.text_range().start(), 5.into());
        assert_eq!(tree.text().to_string(), source);
    }

    #[test]
    fn test_unparsed_text_becomes_error_tokens() {
        let source = "class ?";
        let mut sink = EventSink::new();
        sink.start_node(SyntaxKind::SourceFile);
        sink.finish_node();

        let tree = TreeBuilder::new(source, sink.into_events()).build();
        assert_eq!(tree.text().to_string(), source);
        assert!(tree
            .children_with_tokens()
            .any(|e| e.kind() == SyntaxKind::Error));
    }
}
