use super::{Primary, SymExpr};

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first), including the arguments of function calls.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order.
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the children of a node have all been visited, which is the case when there
    /// are none, or when the last child was the last expression visited.
    fn children_done(&self, children: &'a [SymExpr]) -> bool {
        match (children.last(), self.last_visited) {
            (None, _) => true,
            (Some(last), Some(visited)) => std::ptr::eq(last, visited),
            (Some(_), None) => false,
        }
    }

    /// Pushes the children of a node so that the leftmost child is visited first.
    fn descend(&mut self, children: &'a [SymExpr]) {
        self.stack.extend(children.iter().rev());
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                SymExpr::Primary(Primary::Call(_, args)) => {
                    if self.children_done(args) {
                        return self.visit();
                    }
                    self.descend(args);
                },
                SymExpr::Primary(_) => return self.visit(),
                SymExpr::Add(children) | SymExpr::Mul(children) => {
                    if self.children_done(children) {
                        return self.visit();
                    }
                    self.descend(children);
                },
                SymExpr::Exp(lhs, rhs) => {
                    if self.last_visited.is_some_and(|visited| std::ptr::eq(&**rhs, visited)) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn visits_call_arguments() {
        // sin(x*y) + 2
        let expr = SymExpr::call("sin", vec![SymExpr::symbol("x") * SymExpr::symbol("y")])
            + SymExpr::number(2);
        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "y", "x*y", "sin(x*y)", "2", "sin(x*y) + 2"]);
    }
}
