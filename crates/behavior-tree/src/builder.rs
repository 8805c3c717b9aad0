//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Box::new(Sequence::new(name, vec![...])?)`, you can use shorter functions
//! like `sequence(name, vec![...])?`.

use crate::{Action, ActionNode, Behavior, Condition, ConditionNode, Selector, Sequence, TreeError};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(name, children)?)`.
#[inline]
pub fn sequence<C: 'static>(
    name: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
) -> Result<Box<dyn Behavior<C>>, TreeError> {
    Ok(Box::new(Sequence::new(name, children)?))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(name, children)?)`.
#[inline]
pub fn selector<C: 'static>(
    name: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
) -> Result<Box<dyn Behavior<C>>, TreeError> {
    Ok(Box::new(Selector::new(name, children)?))
}

/// Wraps a condition into a boxed leaf node.
#[inline]
pub fn condition<C: 'static, T: Condition<C> + 'static>(condition: T) -> Box<dyn Behavior<C>> {
    Box::new(ConditionNode::new(condition))
}

/// Wraps an action into a boxed leaf node.
#[inline]
pub fn action<C: 'static, T: Action<C> + 'static>(action: T) -> Box<dyn Behavior<C>> {
    Box::new(ActionNode::new(action))
}
