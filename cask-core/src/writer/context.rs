use crate::Value;
use std::ops::{Deref, DerefMut};

/// Clause currently being written.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    CqlCreateKeyspace,
    CqlCreateTable,
    CqlCreateView,
    CqlDeleteFrom,
    CqlInsertInto,
    CqlInsertIntoValues,
    CqlSelect,
    CqlSelectGroupBy,
    CqlUpdateSet,
    CqlWhere,
}

/// Rendering state: the current fragment and the parameters bound so far.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Context {
    pub fragment: Fragment,
    /// Bound values, one per `?` already written, in order.
    pub parameters: Vec<Value>,
}

impl Context {
    pub fn new(fragment: Fragment) -> Self {
        Self {
            fragment,
            parameters: Vec::new(),
        }
    }
    pub fn bind(&mut self, value: Value) {
        self.parameters.push(value);
    }
    /// Enter `fragment`, the previous one is restored when the returned guard is dropped.
    pub fn switch_fragment(&mut self, fragment: Fragment) -> ContextUpdater<'_> {
        let previous = self.fragment;
        self.fragment = fragment;
        ContextUpdater {
            context: self,
            previous,
        }
    }
}

pub struct ContextUpdater<'a> {
    context: &'a mut Context,
    previous: Fragment,
}

impl Deref for ContextUpdater<'_> {
    type Target = Context;
    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ContextUpdater<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for ContextUpdater<'_> {
    fn drop(&mut self) {
        self.context.fragment = self.previous;
    }
}
