use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use puzzle_trainer::{Puzzle, PuzzleStore, Side};
use serde::Serialize;

use crate::error::AppError;

/// Public view of a puzzle. The solution line stays on the server.
#[derive(Debug, Serialize)]
pub struct PuzzleSummary {
    pub index: usize,
    pub id: u32,
    pub fen: String,
    pub turn: Side,
    pub description: Option<String>,
    pub plies: usize,
}

impl PuzzleSummary {
    fn new(index: usize, puzzle: &Puzzle) -> Self {
        Self {
            index,
            id: puzzle.id,
            fen: puzzle.fen.clone(),
            turn: puzzle.turn,
            description: puzzle.description.clone(),
            plies: puzzle.plies(),
        }
    }
}

/// GET /api/puzzles
pub async fn list_puzzles(Extension(store): Extension<Arc<PuzzleStore>>) -> Json<Vec<PuzzleSummary>> {
    Json(
        store
            .iter()
            .enumerate()
            .map(|(index, puzzle)| PuzzleSummary::new(index, puzzle))
            .collect(),
    )
}

/// GET /api/puzzles/{index}
pub async fn get_puzzle(
    Extension(store): Extension<Arc<PuzzleStore>>,
    Path(index): Path<String>,
) -> Result<Json<PuzzleSummary>, AppError> {
    let index: usize = index
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid puzzle index: {index}")))?;
    let puzzle = store
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("No puzzle at index {index}")))?;
    Ok(Json(PuzzleSummary::new(index, puzzle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Extension<Arc<PuzzleStore>> {
        Extension(Arc::new(PuzzleStore::builtin().unwrap()))
    }

    #[tokio::test]
    async fn test_list_puzzles_hides_solutions() {
        let Json(list) = list_puzzles(store()).await;
        assert_eq!(list.len(), 4);
        assert_eq!(list[2].id, 3);
        assert_eq!(list[2].plies, 1);

        let json = serde_json::to_value(&list[0]).unwrap();
        assert!(json.get("solution").is_none());
        assert_eq!(json["turn"], "white");
    }

    #[tokio::test]
    async fn test_get_puzzle_out_of_range() {
        let err = get_puzzle(store(), Path("4".into())).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let Json(summary) = get_puzzle(store(), Path("3".into())).await.unwrap();
        assert_eq!(summary.id, 4);
    }

    #[tokio::test]
    async fn test_get_puzzle_malformed_index() {
        for raw in ["abc", "-1", "1.5"] {
            let err = get_puzzle(store(), Path(raw.into())).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains(raw)));
        }
    }
}
