use crate::NodeId;

/// A route through the road network.
///
/// Stores the sequence of visited Nodes in `path` and the total length of the route in `cost`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// the visited Nodes, from start to goal
    pub path: Vec<NodeId>,
    /// the summed Edge weights along `path`
    pub cost: f64,
}

impl Route {
    /// creates a new Route with the given sequence of Nodes and total Cost
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use tile_router::Route;
    /// let route = Route::new(vec![1, 2, 3], 4.5);
    ///
    /// assert_eq!(route.path, vec![1, 2, 3]);
    /// assert_eq!(route.cost, 4.5);
    /// ```
    pub fn new(path: Vec<NodeId>, cost: f64) -> Route {
        Route { path, cost }
    }

    /// Takes the Node ids out of the Route
    pub fn into_path(self) -> Vec<NodeId> {
        self.path
    }
}

use std::ops::Deref;

impl Deref for Route {
    type Target = [NodeId];
    fn deref(&self) -> &[NodeId] {
        &self.path
    }
}

use std::fmt;
impl fmt::Display for Route {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Route[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {}", p)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {

    use super::Route;
    #[test]
    fn derefs_to_path() {
        let route = Route::new(vec![4, 2, 0], 4.2);

        assert_eq!(route.len(), 3);
        assert_eq!(route[0], 4);
        assert_eq!(route[1], 2);
        assert_eq!(route[2], 0);
    }

    #[test]
    fn display() {
        let route = Route::new(vec![4, 2, 0], 42.0);

        assert_eq!(&format!("{}", route), "Route[Cost = 42]: 4 -> 2 -> 0");
    }

    #[test]
    fn display_empty() {
        let route = Route::new(Vec::new(), 0.0);

        assert_eq!(&format!("{}", route), "Route[Cost = 0]: <empty>");
    }
}
