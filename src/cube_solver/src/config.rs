use crate::{
    filter::{AnyTurn, NoRedundantTurns},
    goal::FaceSolved,
    heuristic::{FaceHeuristic, PlacementHeuristic, ZeroHeuristic},
    search::{
        DEFAULT_COST_WEIGHT, DEFAULT_MAX_DEPTH, DEFAULT_MIN_DEPTH, SearchStrategy, Solver,
        StagedSolver,
    },
};
use cube_core::{AxisDirection, FaceletLedger, Turn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    AStar,
    IterativeDeepening,
    /// Solve `stage_face` first, then the whole cube.
    Staged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    #[default]
    Placement,
    Zero,
    Face,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    NoRedundant,
    Permissive,
}

/// Everything needed to build a solver, as read from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    pub heuristic: HeuristicKind,
    pub filter: FilterKind,
    pub cost_weight: f64,
    pub min_depth: usize,
    pub max_depth: usize,
    pub max_expansions: Option<usize>,
    pub stage_face: AxisDirection,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverConfigError {
    #[error("Cost weight must be a finite, non-negative number, got {0}")]
    CostWeight(f64),
    #[error("Minimum depth {0} exceeds maximum depth {1}")]
    DepthRange(usize, usize),
    #[error("The stage face must be a face, got {0}")]
    StageFace(AxisDirection),
    #[error("An expansion limit of zero can never find anything")]
    ZeroExpansions,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            strategy: StrategyKind::default(),
            heuristic: HeuristicKind::default(),
            filter: FilterKind::default(),
            cost_weight: DEFAULT_COST_WEIGHT,
            min_depth: DEFAULT_MIN_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: None,
            stage_face: AxisDirection::YNeg,
        }
    }
}

/// A solver assembled from a [`SolverConfig`].
pub enum ConfiguredSolver {
    Single(Solver),
    Staged(StagedSolver),
}

impl ConfiguredSolver {
    #[must_use]
    pub fn solve(&self, start: &FaceletLedger) -> Option<Vec<Turn>> {
        match self {
            ConfiguredSolver::Single(solver) => solver.solve(start),
            ConfiguredSolver::Staged(staged) => staged.solve(start),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if !self.cost_weight.is_finite() || self.cost_weight < 0.0 {
            return Err(SolverConfigError::CostWeight(self.cost_weight));
        }
        if self.min_depth > self.max_depth {
            return Err(SolverConfigError::DepthRange(self.min_depth, self.max_depth));
        }
        if self.stage_face == AxisDirection::Center {
            return Err(SolverConfigError::StageFace(self.stage_face));
        }
        if self.max_expansions == Some(0) {
            return Err(SolverConfigError::ZeroExpansions);
        }
        Ok(())
    }

    fn search_strategy(&self) -> SearchStrategy {
        match self.strategy {
            StrategyKind::IterativeDeepening => SearchStrategy::IterativeDeepening {
                min_depth: self.min_depth,
                max_depth: self.max_depth,
            },
            StrategyKind::AStar | StrategyKind::Staged => SearchStrategy::AStar {
                cost_weight: self.cost_weight,
                max_expansions: self.max_expansions,
            },
        }
    }

    /// A solver for the whole cube with the configured heuristic and
    /// filter.
    fn full_solver(&self) -> Solver {
        let solver = Solver::new(self.search_strategy());
        let solver = match self.heuristic {
            HeuristicKind::Placement => solver.with_heuristic(PlacementHeuristic),
            HeuristicKind::Zero => solver.with_heuristic(ZeroHeuristic),
            HeuristicKind::Face => solver.with_heuristic(FaceHeuristic {
                face: self.stage_face,
            }),
        };
        match self.filter {
            FilterKind::NoRedundant => solver.with_filter(NoRedundantTurns),
            FilterKind::Permissive => solver.with_filter(AnyTurn),
        }
    }

    pub fn build(&self) -> Result<ConfiguredSolver, SolverConfigError> {
        self.validate()?;
        Ok(match self.strategy {
            StrategyKind::AStar | StrategyKind::IterativeDeepening => {
                ConfiguredSolver::Single(self.full_solver())
            }
            StrategyKind::Staged => {
                let face = self.stage_face;
                let first = Solver::new(self.search_strategy())
                    .with_heuristic(FaceHeuristic { face })
                    .with_goal(FaceSolved { face });
                let first = match self.filter {
                    FilterKind::NoRedundant => first.with_filter(NoRedundantTurns),
                    FilterKind::Permissive => first.with_filter(AnyTurn),
                };
                ConfiguredSolver::Staged(StagedSolver::new(vec![first, self.full_solver()]))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: SolverConfig = toml::from_str("strategy = \"iterative_deepening\"").unwrap();
        assert_eq!(config.strategy, StrategyKind::IterativeDeepening);
        assert_eq!(config.cost_weight, DEFAULT_COST_WEIGHT);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.stage_face, AxisDirection::YNeg);
    }

    #[test]
    fn parses_every_field() {
        let config: SolverConfig = toml::from_str(
            r#"
            strategy = "staged"
            heuristic = "zero"
            filter = "permissive"
            cost_weight = 2.5
            min_depth = 1
            max_depth = 6
            max_expansions = 1000
            stage_face = "z_plus"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            SolverConfig {
                strategy: StrategyKind::Staged,
                heuristic: HeuristicKind::Zero,
                filter: FilterKind::Permissive,
                cost_weight: 2.5,
                min_depth: 1,
                max_depth: 6,
                max_expansions: Some(1000),
                stage_face: AxisDirection::ZPos,
            }
        );
        assert!(toml::from_str::<SolverConfig>("weight = 3.0").is_err());
    }

    #[test]
    fn rejects_invalid_settings() {
        let bad = |config: SolverConfig| config.validate().unwrap_err();
        assert_eq!(
            bad(SolverConfig {
                cost_weight: -1.0,
                ..SolverConfig::default()
            }),
            SolverConfigError::CostWeight(-1.0)
        );
        assert_eq!(
            bad(SolverConfig {
                min_depth: 4,
                max_depth: 3,
                ..SolverConfig::default()
            }),
            SolverConfigError::DepthRange(4, 3)
        );
        assert_eq!(
            bad(SolverConfig {
                stage_face: AxisDirection::Center,
                ..SolverConfig::default()
            }),
            SolverConfigError::StageFace(AxisDirection::Center)
        );
        assert!(SolverConfig::default().build().is_ok());
    }

    #[test]
    fn huge_depth_limit_is_accepted() {
        let config = SolverConfig {
            strategy: StrategyKind::IterativeDeepening,
            max_depth: usize::MAX,
            ..SolverConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        let solver = config.build().unwrap();
        assert_eq!(solver.solve(&FaceletLedger::solved()), Some(vec![]));
    }

    #[test]
    fn staged_config_builds_two_stages() {
        let config = SolverConfig {
            strategy: StrategyKind::Staged,
            ..SolverConfig::default()
        };
        let ConfiguredSolver::Staged(staged) = config.build().unwrap() else {
            panic!("expected a staged solver");
        };
        assert_eq!(staged.stages().len(), 2);
        let turned = FaceletLedger::solved().turned("Y+".parse().unwrap());
        assert!(staged.stages()[0].is_goal(&turned));
        assert!(!staged.stages()[1].is_goal(&turned));
    }
}
