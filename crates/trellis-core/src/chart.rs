//! Semantic model for structure charts.
//!
//! A [`Chart`] holds everything one diagram declares: modules,
//! storages, connections, conditional gates, and loop markers. It is
//! built fresh per compile call by the parser and never mutated after
//! layout; nothing here is cached across charts.
//!
//! Entities are tagged types rather than string-keyed maps, so a
//! connection's flow kind or direction can never be misspelled past
//! the parser.

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Fixed box and spacing metrics for the structure-chart visual grammar.
///
/// Every module box is the same size; the layout engine packs leaf
/// boxes `SPACING_X` apart and stacks tree levels `SPACING_Y` apart.
pub mod metrics {
    /// Width of a module or storage box, in SVG user units.
    pub const MODULE_WIDTH: f32 = 120.0;
    /// Height of a module or storage box.
    pub const MODULE_HEIGHT: f32 = 50.0;
    /// Horizontal gap between sibling boxes.
    pub const SPACING_X: f32 = 40.0;
    /// Vertical gap between tree levels.
    pub const SPACING_Y: f32 = 80.0;
}

/// The kind of a declared module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// A plain (control or sub) module.
    Plain,
    /// A reusable library module, rendered with an underlined label.
    Library,
}

/// A declared module: one rectangle in the chart.
#[derive(Debug, Clone)]
pub struct Module {
    id: String,
    label: String,
    kind: ModuleKind,
    level: usize,
}

impl Module {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: ModuleKind,
        level: usize,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            level,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// The indentation-derived nesting depth from the source text.
    ///
    /// Layout assigns its own tree depth; this value only feeds the
    /// storage-row offset and loop-anchor fallbacks.
    pub fn level(&self) -> usize {
        self.level
    }
}

/// A physical-storage node, rendered as a cylinder in its own bottom row.
#[derive(Debug, Clone)]
pub struct Storage {
    id: String,
    label: String,
    level: usize,
}

impl Storage {
    pub fn new(id: impl Into<String>, label: impl Into<String>, level: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

/// What passes along a call edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowKind {
    /// A bare call edge with no indicator.
    #[default]
    Normal,
    /// Data flow: hollow circle indicator.
    Data,
    /// Control flow: filled circle indicator.
    Control,
}

/// Orientation of a flow indicator relative to the call edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Indicator points the same way as the edge (parent to child).
    #[default]
    Forward,
    /// Indicator points back up the edge.
    Backward,
}

/// A call edge between two modules.
///
/// Multiple connections may share the same `(from, to)` pair; the
/// renderer fans their indicators out along the edge.
#[derive(Debug, Clone)]
pub struct Connection {
    from: String,
    to: String,
    kind: FlowKind,
    direction: Direction,
    label: String,
}

impl Connection {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: FlowKind,
        direction: Direction,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            direction,
            label: label.into(),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A conditional gate: one diamond with an ordered list of branch targets.
#[derive(Debug, Clone)]
pub struct Conditional {
    from: String,
    targets: Vec<String>,
}

impl Conditional {
    pub fn new(from: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            from: from.into(),
            targets,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}

/// A loop marker covering an ordered list of modules.
#[derive(Debug, Clone)]
pub struct Loop {
    over: Vec<String>,
}

impl Loop {
    pub fn new(over: Vec<String>) -> Self {
        Self { over }
    }

    pub fn over(&self) -> &[String] {
        &self.over
    }
}

/// The aggregate of all declarations in one chart.
///
/// Module iteration follows declaration order; redeclaring an id
/// replaces the entry in place (last declaration wins, silently).
#[derive(Debug, Clone, Default)]
pub struct Chart {
    modules: IndexMap<String, Module>,
    storages: Vec<Storage>,
    connections: Vec<Connection>,
    conditionals: Vec<Conditional>,
    loops: Vec<Loop>,
    levels: BTreeMap<usize, Vec<String>>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a module, overwriting any previous declaration of the
    /// same id while keeping its original position.
    pub fn add_module(&mut self, module: Module) {
        self.levels
            .entry(module.level())
            .or_default()
            .push(module.id().to_string());
        self.modules.insert(module.id().to_string(), module);
    }

    pub fn add_storage(&mut self, storage: Storage) {
        self.storages.push(storage);
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn add_conditional(&mut self, conditional: Conditional) {
        self.conditionals.push(conditional);
    }

    pub fn add_loop(&mut self, lp: Loop) {
        self.loops.push(lp);
    }

    pub fn modules(&self) -> &IndexMap<String, Module> {
        &self.modules
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn storages(&self) -> &[Storage] {
        &self.storages
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn conditionals(&self) -> &[Conditional] {
        &self.conditionals
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// The deepest indentation level any module declaration used.
    ///
    /// Drives the y-offset of the storage row, nothing else.
    pub fn max_declared_level(&self) -> usize {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_module_overwrites_in_place() {
        let mut chart = Chart::new();
        chart.add_module(Module::new("a", "First", ModuleKind::Plain, 0));
        chart.add_module(Module::new("b", "Other", ModuleKind::Plain, 0));
        chart.add_module(Module::new("a", "Second", ModuleKind::Library, 1));

        assert_eq!(chart.modules().len(), 2);
        // Last declaration wins for the value.
        let a = chart.module("a").unwrap();
        assert_eq!(a.label(), "Second");
        assert_eq!(a.kind(), ModuleKind::Library);
        // Original declaration order is kept.
        let ids: Vec<&str> = chart.modules().keys().map(String::as_str).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_max_declared_level_tracks_modules_and_redeclarations() {
        let mut chart = Chart::new();
        assert_eq!(chart.max_declared_level(), 0);

        chart.add_module(Module::new("root", "Root", ModuleKind::Plain, 0));
        chart.add_module(Module::new("leaf", "Leaf", ModuleKind::Plain, 2));
        assert_eq!(chart.max_declared_level(), 2);
    }

    #[test]
    fn test_connection_defaults() {
        let conn = Connection::new("a", "b", FlowKind::default(), Direction::default(), "");
        assert_eq!(conn.kind(), FlowKind::Normal);
        assert_eq!(conn.direction(), Direction::Forward);
        assert_eq!(conn.label(), "");
    }
}
