use crate::{
    filter::{MoveFilter, NoRedundantTurns},
    goal::{GoalTest, Solved},
    heuristic::{Heuristic, PlacementHeuristic},
    start, success, working,
};
use cube_core::{FaceletLedger, Turn};
use fxhash::FxHashSet;
use log::{Level, debug, info, log_enabled};
use std::{cmp::Ordering, collections::BinaryHeap, time::Instant};

pub const DEFAULT_COST_WEIGHT: f64 = 10.0;
pub const DEFAULT_MIN_DEPTH: usize = 0;
pub const DEFAULT_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStrategy {
    /// Best first search ordered by `estimate + turns * cost_weight`.
    /// Gives up after `max_expansions` distinct states when set.
    AStar {
        cost_weight: f64,
        max_expansions: Option<usize>,
    },
    /// Depth first search with a growing turn budget, trying every budget
    /// in `min_depth..=max_depth`.
    IterativeDeepening { min_depth: usize, max_depth: usize },
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::AStar {
            cost_weight: DEFAULT_COST_WEIGHT,
            max_expansions: None,
        }
    }
}

/// A search over turn sequences, parameterized by how states are scored,
/// which states count as done, and which turns may follow which.
pub struct Solver {
    strategy: SearchStrategy,
    heuristic: Box<dyn Heuristic>,
    goal: Box<dyn GoalTest>,
    filter: Box<dyn MoveFilter>,
}

struct OpenNode {
    ledger: FaceletLedger,
    path: Vec<Turn>,
    priority: f64,
    order: u64,
}

// Reversed so that `BinaryHeap` pops the lowest priority first, oldest
// first among equals.
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Solver {
    /// Full cube solving with the placement heuristic and redundant turn
    /// pruning.
    #[must_use]
    pub fn new(strategy: SearchStrategy) -> Self {
        Solver {
            strategy,
            heuristic: Box::new(PlacementHeuristic),
            goal: Box::new(Solved),
            filter: Box::new(NoRedundantTurns),
        }
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: impl Heuristic + 'static) -> Self {
        self.heuristic = Box::new(heuristic);
        self
    }

    #[must_use]
    pub fn with_goal(mut self, goal: impl GoalTest + 'static) -> Self {
        self.goal = Box::new(goal);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl MoveFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    #[must_use]
    pub fn estimate(&self, ledger: &FaceletLedger) -> u32 {
        self.heuristic.estimate(ledger)
    }

    #[must_use]
    pub fn is_goal(&self, ledger: &FaceletLedger) -> bool {
        self.goal.is_goal(ledger)
    }

    #[must_use]
    pub fn is_legal(&self, candidate: Turn, history: &[Turn]) -> bool {
        self.filter.is_legal(candidate, history)
    }

    /// The A* ordering key for `ledger` reached after `turns` turns.
    ///
    /// Iterative deepening never orders states, so under that strategy
    /// turns are weighted by [`DEFAULT_COST_WEIGHT`].
    #[must_use]
    pub fn priority(&self, ledger: &FaceletLedger, turns: usize) -> f64 {
        let cost_weight = match self.strategy {
            SearchStrategy::AStar { cost_weight, .. } => cost_weight,
            SearchStrategy::IterativeDeepening { .. } => DEFAULT_COST_WEIGHT,
        };
        #[allow(clippy::cast_precision_loss)]
        let turns = turns as f64;
        f64::from(self.estimate(ledger)) + turns * cost_weight
    }

    /// The turns the filter allows after `history`, in [`Turn::ALL`] order.
    pub fn legal_turns<'a>(&'a self, history: &'a [Turn]) -> impl Iterator<Item = Turn> + 'a {
        Turn::ALL
            .into_iter()
            .filter(move |&turn| self.is_legal(turn, history))
    }

    /// Finds a turn sequence taking `start` to a goal state, or `None`
    /// when the search space or its limits run out first.
    #[must_use]
    pub fn solve(&self, start: &FaceletLedger) -> Option<Vec<Turn>> {
        match self.strategy {
            SearchStrategy::AStar {
                max_expansions, ..
            } => self.a_star(start, max_expansions),
            SearchStrategy::IterativeDeepening {
                min_depth,
                max_depth,
            } => self.iterative_deepening(start, min_depth, max_depth),
        }
    }

    fn a_star(&self, start: &FaceletLedger, max_expansions: Option<usize>) -> Option<Vec<Turn>> {
        info!(start!("Searching with A*"));
        let started = Instant::now();

        let mut open = BinaryHeap::new();
        let mut closed = FxHashSet::<FaceletLedger>::default();
        let mut pushed = 0_u64;
        open.push(OpenNode {
            ledger: start.clone(),
            path: vec![],
            priority: self.priority(start, 0),
            order: pushed,
        });

        while let Some(node) = open.pop() {
            if self.is_goal(&node.ledger) {
                info!(
                    success!("Found a {} turn solution in {:.3}s after expanding {} states"),
                    node.path.len(),
                    started.elapsed().as_secs_f64(),
                    closed.len()
                );
                return Some(node.path);
            }
            if closed.contains(&node.ledger) {
                continue;
            }
            if let Some(limit) = max_expansions
                && closed.len() >= limit
            {
                info!("Gave up after expanding {limit} states");
                return None;
            }

            for turn in self.legal_turns(&node.path) {
                let ledger = node.ledger.turned(turn);
                if closed.contains(&ledger) {
                    continue;
                }
                let mut path = Vec::with_capacity(node.path.len() + 1);
                path.extend_from_slice(&node.path);
                path.push(turn);
                pushed += 1;
                open.push(OpenNode {
                    priority: self.priority(&ledger, path.len()),
                    ledger,
                    path,
                    order: pushed,
                });
            }
            closed.insert(node.ledger);

            if log_enabled!(Level::Debug) && closed.len() % 10_000 == 0 {
                debug!(
                    working!("Expanded {} states, {} open, {:.3}s"),
                    closed.len(),
                    open.len(),
                    started.elapsed().as_secs_f64()
                );
            }
        }

        info!("Exhausted every reachable state after {:.3}s", started.elapsed().as_secs_f64());
        None
    }

    fn iterative_deepening(
        &self,
        start: &FaceletLedger,
        min_depth: usize,
        max_depth: usize,
    ) -> Option<Vec<Turn>> {
        info!(start!("Searching with iterative deepening"));
        let started = Instant::now();
        let mut path = Vec::new();

        for depth in min_depth..=max_depth {
            debug!(working!("Searching depth {}..."), depth);
            let depth_start = Instant::now();
            let mut nodes_visited = 0_u64;
            let found = self.depth_limited(start, &mut path, depth, &mut nodes_visited);
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                nodes_visited,
                depth_start.elapsed().as_secs_f64()
            );
            if found {
                info!(
                    success!("Found a {} turn solution in {:.3}s at depth {}"),
                    path.len(),
                    started.elapsed().as_secs_f64(),
                    depth
                );
                return Some(path);
            }
        }

        info!("No solution within {max_depth} turns");
        None
    }

    /// Leaves the solution in `path` and returns `true` when one exists
    /// within `budget` more turns.
    fn depth_limited(
        &self,
        ledger: &FaceletLedger,
        path: &mut Vec<Turn>,
        budget: usize,
        nodes_visited: &mut u64,
    ) -> bool {
        *nodes_visited += 1;
        if self.is_goal(ledger) {
            return true;
        }
        if budget == 0 {
            return false;
        }

        for turn in Turn::ALL {
            if !self.is_legal(turn, path) {
                continue;
            }
            path.push(turn);
            if self.depth_limited(&ledger.turned(turn), path, budget - 1, nodes_visited) {
                return true;
            }
            path.pop();
        }
        false
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(SearchStrategy::default())
    }
}

/// Runs solvers one after another, each starting where the previous one
/// left off, and concatenates their solutions.
pub struct StagedSolver {
    stages: Vec<Solver>,
}

impl StagedSolver {
    #[must_use]
    pub fn new(stages: Vec<Solver>) -> Self {
        StagedSolver { stages }
    }

    #[must_use]
    pub fn stages(&self) -> &[Solver] {
        &self.stages
    }

    #[must_use]
    pub fn solve(&self, start: &FaceletLedger) -> Option<Vec<Turn>> {
        let mut ledger = start.clone();
        let mut solution = vec![];
        for (i, stage) in self.stages.iter().enumerate() {
            debug!(working!("Running stage {}"), i + 1);
            let turns = stage.solve(&ledger)?;
            ledger.apply_turns(&turns);
            solution.extend(turns);
        }
        Some(solution)
    }
}
