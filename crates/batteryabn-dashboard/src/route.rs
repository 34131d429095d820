/*
[INPUT]:  Navigation targets chosen by the operator
[OUTPUT]: Route enum and the navigation stack
[POS]:    Navigation layer - one route per screen
[UPDATE]: When adding screens or changing the browse hierarchy
*/

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Projects,
    UnlistedProjects,
    Project(String),
    /// Cells belonging to a project
    Cells(String),
    CellSearch,
    Cell(String),
    CellPlot { cell: String, index: usize },
    /// Test records of a cell
    TestRecords(String),
    TestRecordSearch,
    TestRecord {
        name: String,
        test_type: Option<String>,
    },
    TaskTrigger,
    TaskStatus,
}

impl Route {
    pub fn title(&self) -> String {
        match self {
            Route::Projects => "Projects".to_string(),
            Route::UnlistedProjects => "Unlisted Projects".to_string(),
            Route::Project(name) => format!("Project {name}"),
            Route::Cells(project) => format!("Cells of {project}"),
            Route::CellSearch => "Cell Search".to_string(),
            Route::Cell(name) => format!("Cell {name}"),
            Route::CellPlot { cell, index } => format!("Plot {index} of {cell}"),
            Route::TestRecords(cell) => format!("Test Records of {cell}"),
            Route::TestRecordSearch => "Test Record Search".to_string(),
            Route::TestRecord {
                name,
                test_type: Some(test_type),
            } => format!("Test Record {name} ({test_type})"),
            Route::TestRecord { name, .. } => format!("Test Record {name}"),
            Route::TaskTrigger => "Tasks".to_string(),
            Route::TaskStatus => "Task Status".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Back-navigation history. The last element is the current route and the
/// stack never becomes empty.
#[derive(Debug, Clone)]
pub struct RouteStack {
    routes: Vec<Route>,
}

impl RouteStack {
    pub fn new(root: Route) -> Self {
        Self { routes: vec![root] }
    }

    pub fn current(&self) -> &Route {
        // `routes` always holds at least the root
        &self.routes[self.routes.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Drop the current route. Returns the new current route, or `None` when
    /// already at the root.
    pub fn pop(&mut self) -> Option<&Route> {
        if self.routes.len() <= 1 {
            return None;
        }
        self.routes.pop();
        Some(self.current())
    }

    /// Start a new history at `root`
    pub fn reset(&mut self, root: Route) {
        self.routes.clear();
        self.routes.push(root);
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    /// Titles from root to current, for the header breadcrumb
    pub fn breadcrumb(&self) -> String {
        self.routes
            .iter()
            .map(Route::title)
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_never_pops_root() {
        let mut stack = RouteStack::new(Route::Projects);
        stack.push(Route::Cells("GMJuly2022".to_string()));
        stack.push(Route::Cell("GMJuly2022_CELL001".to_string()));
        assert_eq!(stack.depth(), 3);

        assert_eq!(stack.pop(), Some(&Route::Cells("GMJuly2022".to_string())));
        assert_eq!(stack.pop(), Some(&Route::Projects));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.current(), &Route::Projects);
    }

    #[test]
    fn test_breadcrumb_and_reset() {
        let mut stack = RouteStack::new(Route::Projects);
        stack.push(Route::Cells("P".to_string()));
        assert_eq!(stack.breadcrumb(), "Projects > Cells of P");

        stack.reset(Route::TaskStatus);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.breadcrumb(), "Task Status");
    }

    #[test]
    fn test_titles() {
        let route = Route::CellPlot {
            cell: "CELL_A".to_string(),
            index: 2,
        };
        assert_eq!(route.title(), "Plot 2 of CELL_A");

        let route = Route::TestRecord {
            name: "TR_01".to_string(),
            test_type: Some("Cycling".to_string()),
        };
        assert_eq!(route.to_string(), "Test Record TR_01 (Cycling)");
    }
}
