//! Test doubles and common utilities for option registry contract tests
//!
//! This module provides a scripted host that records every call the core
//! makes, so tests can assert both results and interaction counts.

#![allow(dead_code)]

use coreopt_core::{Host, OptionRegistry, Variable};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A host whose answers are scripted by the test
pub struct ScriptedHost {
    /// Selected labels
    values: Arc<Mutex<HashMap<String, String>>>,
    /// Answer to the next `variable_update()` (`None` = unsupported)
    update_answer: Arc<Mutex<Option<bool>>>,
    /// When false, `get_variable()` answers nothing
    reachable: Arc<AtomicBool>,
    /// Every schema received, in order
    published: Arc<Mutex<Vec<Vec<Variable>>>>,
    /// Call counter for get_variable()
    get_call_count: Arc<AtomicUsize>,
    /// Call counter for variable_update()
    update_call_count: Arc<AtomicUsize>,
}

impl ScriptedHost {
    /// Create a reachable host that reports no changes
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
            update_answer: Arc::new(Mutex::new(Some(false))),
            reachable: Arc::new(AtomicBool::new(true)),
            published: Arc::new(Mutex::new(Vec::new())),
            get_call_count: Arc::new(AtomicUsize::new(0)),
            update_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a new ScriptedHost that shares state and counters with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            values: Arc::clone(&other.values),
            update_answer: Arc::clone(&other.update_answer),
            reachable: Arc::clone(&other.reachable),
            published: Arc::clone(&other.published),
            get_call_count: Arc::clone(&other.get_call_count),
            update_call_count: Arc::clone(&other.update_call_count),
        }
    }

    /// Select a label (does not by itself report a change)
    pub fn select(&self, key: &str, label: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), label.to_string());
    }

    /// Script the answer of `variable_update()`
    pub fn answer_update(&self, answer: Option<bool>) {
        *self.update_answer.lock().unwrap() = answer;
    }

    /// Make `get_variable()` answer nothing
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Every schema received so far
    pub fn published(&self) -> Vec<Vec<Variable>> {
        self.published.lock().unwrap().clone()
    }

    /// Get the number of times get_variable() was called
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times variable_update() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }
}

impl Host for ScriptedHost {
    fn set_variables(&self, variables: &[Variable]) -> bool {
        self.published.lock().unwrap().push(variables.to_vec());
        true
    }

    fn get_variable(&self, key: &str) -> Option<String> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        if !self.reachable.load(Ordering::SeqCst) {
            return None;
        }
        self.values.lock().unwrap().get(key).cloned()
    }

    fn variable_update(&self) -> Option<bool> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        *self.update_answer.lock().unwrap()
    }
}

/// Helper to create a registry attached to a fresh scripted host
///
/// Returns the registry and a handle sharing the host's state.
pub fn scripted_registry() -> (Arc<OptionRegistry>, ScriptedHost) {
    let host = ScriptedHost::new();
    let handle = ScriptedHost::sharing_state_with(&host);
    let registry = Arc::new(OptionRegistry::with_host(Arc::new(host)));
    (registry, handle)
}
