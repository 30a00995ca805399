//! Keeps the single game being played
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::Game;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Storage for the one current game. There is no history and no game identifier; saving replaces
/// whatever was stored before.
pub trait GameStore {
    /// Stores `game` as the current game.
    fn save(&mut self, game: Game);

    /// Returns the current game, if one has been saved.
    fn select(&self) -> Option<&Game>;

    /// Replaces the current game with `game`.
    fn update(&mut self, game: Game);
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A `GameStore` that keeps the game in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    game: Option<Game>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        InMemoryStore::default()
    }
}

impl GameStore for InMemoryStore {
    fn save(&mut self, game: Game) {
        self.game = Some(game);
    }

    fn select(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    fn update(&mut self, game: Game) {
        self.game = Some(game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_game() {
        assert!(InMemoryStore::new().select().is_none());
    }

    #[test]
    fn update_replaces_the_saved_game() {
        let mut store = InMemoryStore::new();
        store.save(Game::new());

        let mut game = store.select().cloned().unwrap();
        game.make_move_from_str("e2", "e4").unwrap();
        assert_eq!(store.select().unwrap().history().len(), 0);

        store.update(game.clone());
        assert_eq!(store.select(), Some(&game));

        store.save(Game::new());
        assert_eq!(store.select(), Some(&Game::new()));
    }
}
