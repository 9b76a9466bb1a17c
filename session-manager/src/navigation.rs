use crate::routes::Route;
use parking_lot::Mutex;

/// Screen stack the session drives
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Replace the whole history with a single screen
    fn reset_to_route(&self, route: Route);

    /// Pop one screen; no-op on the root
    fn go_back(&self);
}

/// In-memory named-route stack
#[derive(Debug)]
pub struct NavigationStack {
    stack: Mutex<Vec<Route>>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        Self {
            stack: Mutex::new(vec![Route::Login]),
        }
    }

    pub fn push(&self, route: Route) {
        self.stack.lock().push(route);
    }

    pub fn current(&self) -> Route {
        self.stack.lock().last().copied().unwrap_or(Route::Login)
    }

    pub fn history(&self) -> Vec<Route> {
        self.stack.lock().clone()
    }
}

impl Navigator for NavigationStack {
    fn reset_to_route(&self, route: Route) {
        tracing::debug!(%route, "navigation reset");
        let mut stack = self.stack.lock();
        stack.clear();
        stack.push(route);
    }

    fn go_back(&self) {
        let mut stack = self.stack.lock();
        if stack.len() > 1 {
            stack.pop();
        }
    }
}
