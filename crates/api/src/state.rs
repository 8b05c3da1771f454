use std::sync::Arc;

use solver_milp::MilpSolver;

#[derive(Clone)]
pub struct AppState {
    pub solver: Arc<MilpSolver>,
}

impl AppState {
    pub fn new_default() -> Self {
        Self {
            solver: Arc::new(MilpSolver::new()),
        }
    }
}
