//! Authoritative grid state and move-resolution primitives
//!
//! The world owns the cells, the player registry, and the item stock. All
//! mutation flows through the resolution entry points here; views handed to
//! strategies are deep copies and can never write back.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::path::PathBuf;

use crate::core::config::WorldConfig;
use crate::core::error::{GridError, Result};
use crate::core::types::{Direction, PlayerName, StepOffset};
use crate::world::cell::{Bonus, BonusKind, Cell};
use crate::world::level;
use crate::world::player::Player;

/// Spawn weights for bonus kinds: score drops dominate, poison is rare
const BONUS_KINDS: [BonusKind; 3] = [BonusKind::Poison, BonusKind::Heal, BonusKind::Score];
const BONUS_KIND_WEIGHTS: [u32; 3] = [1, 2, 5];

/// Spawn weights for bonus magnitudes 1..=3: small values are common
const BONUS_VALUE_WEIGHTS: [u32; 3] = [3, 2, 1];

/// Immutable deep copy of the grid for per-agent decision making
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub size_x: i32,
    pub size_y: i32,
    cells: Vec<Cell>,
    players: Vec<Player>,
}

impl GridSnapshot {
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.size_x && y < self.size_y
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get((y * self.size_x + x) as usize)
        } else {
            None
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
}

/// The authoritative mutable grid world
///
/// Created once per simulation run and mutated in place every turn; reset
/// only through [`restart`](GridWorld::restart). The embedded RNG makes two
/// clones of the same world evolve identically under identical moves.
#[derive(Debug, Clone)]
pub struct GridWorld {
    size_x: i32,
    size_y: i32,
    cells: Vec<Cell>,
    /// Registration order; fixes per-turn resolution order
    players: Vec<Player>,
    num_items: u32,
    available_items: u32,
    level_map_path: Option<PathBuf>,
    rng: ChaCha8Rng,
    kind_weights: WeightedIndex<u32>,
    value_weights: WeightedIndex<u32>,
}

impl GridWorld {
    /// Build and populate a world from validated configuration
    pub fn new(config: &WorldConfig) -> Result<Self> {
        config.validate()?;

        let players = config
            .player_names
            .iter()
            .map(|name| Player::new(name.clone(), 0, 0, config.max_health))
            .collect();

        let mut world = Self {
            size_x: config.size_x,
            size_y: config.size_y,
            cells: Vec::new(),
            players,
            num_items: config.num_items,
            available_items: 0,
            level_map_path: config.level_map_path.clone(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            kind_weights: WeightedIndex::new(BONUS_KIND_WEIGHTS)
                .map_err(|e| GridError::Configuration(e.to_string()))?,
            value_weights: WeightedIndex::new(BONUS_VALUE_WEIGHTS)
                .map_err(|e| GridError::Configuration(e.to_string()))?,
        };
        world.restart()?;
        Ok(world)
    }

    /// Regenerate walls, reposition all players, respawn the item stock
    ///
    /// Player objects are reused across restarts (health and score reset),
    /// preserving identity for replay and resume.
    pub fn restart(&mut self) -> Result<()> {
        self.generate_walls();
        self.available_items = 0;
        self.scatter_players()?;
        self.recharge_items()
    }

    fn generate_walls(&mut self) {
        if let Some(path) = self.level_map_path.clone() {
            match level::load(&path) {
                Ok(map) => {
                    self.size_x = map.size_x;
                    self.size_y = map.size_y;
                    self.cells = map.cells;
                    return;
                }
                Err(err) => {
                    tracing::warn!(
                        "Couldn't load level map {}: {err}; using bordered rectangle",
                        path.display()
                    );
                }
            }
        }

        self.cells = vec![Cell::Empty; (self.size_x * self.size_y) as usize];
        for x in 0..self.size_x {
            self.set_cell(x, 0, Cell::Wall);
            self.set_cell(x, self.size_y - 1, Cell::Wall);
        }
        for y in 0..self.size_y {
            self.set_cell(0, y, Cell::Wall);
            self.set_cell(self.size_x - 1, y, Cell::Wall);
        }
    }

    fn scatter_players(&mut self) -> Result<()> {
        for idx in 0..self.players.len() {
            let (x, y) = self.rand_empty_interior()?;
            let player = &mut self.players[idx];
            player.reset();
            player.x = x;
            player.y = y;
            let name = player.name.clone();
            self.set_cell(x, y, Cell::Player(name));
        }
        Ok(())
    }

    /// Random empty interior cell; falls back to a scan when probing fails
    fn rand_empty_interior(&mut self) -> Result<(i32, i32)> {
        if self.size_x >= 3 && self.size_y >= 3 {
            let attempts = (self.size_x as usize) * (self.size_y as usize) * 4;
            for _ in 0..attempts {
                let x = self.rng.gen_range(1..self.size_x - 1);
                let y = self.rng.gen_range(1..self.size_y - 1);
                if matches!(self.cell(x, y), Some(Cell::Empty)) {
                    return Ok((x, y));
                }
            }
            for y in 1..self.size_y - 1 {
                for x in 1..self.size_x - 1 {
                    if matches!(self.cell(x, y), Some(Cell::Empty)) {
                        return Ok((x, y));
                    }
                }
            }
        }
        Err(GridError::Configuration(
            "no empty interior cell available".into(),
        ))
    }

    pub fn size_x(&self) -> i32 {
        self.size_x
    }

    pub fn size_y(&self) -> i32 {
        self.size_y
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.size_x && y < self.size_y
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get((y * self.size_x + x) as usize)
        } else {
            None
        }
    }

    fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            self.cells[(y * self.size_x + x) as usize] = cell;
        }
    }

    /// Registered players in registration order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &PlayerName) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| &p.name == name)
            .ok_or_else(|| GridError::PlayerNotFound(name.clone()))
    }

    pub fn player_mut(&mut self, name: &PlayerName) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| &p.name == name)
            .ok_or_else(|| GridError::PlayerNotFound(name.clone()))
    }

    fn player_index(&self, name: &PlayerName) -> Result<usize> {
        self.players
            .iter()
            .position(|p| &p.name == name)
            .ok_or_else(|| GridError::PlayerNotFound(name.clone()))
    }

    /// Bonus items currently on the grid; never exceeds the configured target
    pub fn available_items(&self) -> u32 {
        self.available_items
    }

    /// True iff the cell is in bounds and neither wall nor player
    pub fn can_move_to(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(Cell::is_passable)
    }

    /// Resolve a shot: ray-march from the shooter until blocked
    ///
    /// A living player blocking the ray takes 1 damage and awards the
    /// shooter 1 score; a wall or the grid edge absorbs the shot. The ray
    /// starts one cell away from the shooter and marches outward, so the
    /// shooter can never be struck by its own shot.
    pub fn handle_shoot(&mut self, name: &PlayerName, direction: Direction) -> Result<()> {
        let shooter = self.player_index(name)?;
        let step = direction.offset();
        let mut x = self.players[shooter].x + step.dx();
        let mut y = self.players[shooter].y + step.dy();
        while self.can_move_to(x, y) {
            x += step.dx();
            y += step.dy();
        }

        let target = match self.cell(x, y) {
            Some(Cell::Player(target_name)) => self.player_index(target_name)?,
            _ => return Ok(()), // wall or grid edge absorbs the shot
        };
        if !self.players[target].is_alive() {
            return Ok(());
        }

        self.players[target].damage(1);
        self.players[shooter].change_score(1);
        Ok(())
    }

    /// Resolve a direct move; strict no-op when the destination is blocked
    ///
    /// A bonus at the destination is applied to the mover and consumed in
    /// the same action, before the mover occupies the cell.
    pub fn handle_direct_move(&mut self, name: &PlayerName, step: StepOffset) -> Result<()> {
        let idx = self.player_index(name)?;
        if !self.players[idx].is_alive() {
            return Ok(());
        }

        let (ox, oy) = (self.players[idx].x, self.players[idx].y);
        let (nx, ny) = (ox + step.dx(), oy + step.dy());
        if !self.can_move_to(nx, ny) {
            return Ok(());
        }

        self.set_cell(ox, oy, Cell::Empty);
        self.players[idx].x = nx;
        self.players[idx].y = ny;

        if let Some(&Cell::Bonus(bonus)) = self.cell(nx, ny) {
            bonus.apply(&mut self.players[idx]);
            self.available_items -= 1;
        }

        let name = self.players[idx].name.clone();
        self.set_cell(nx, ny, Cell::Player(name));
        Ok(())
    }

    /// Spawn bonuses at random empty interior cells until the stock is full
    pub fn recharge_items(&mut self) -> Result<()> {
        while self.available_items < self.num_items {
            let (x, y) = self.rand_empty_interior()?;
            let bonus = self.spawn_bonus();
            self.set_cell(x, y, Cell::Bonus(bonus));
            self.available_items += 1;
        }
        Ok(())
    }

    fn spawn_bonus(&mut self) -> Bonus {
        let kind = BONUS_KINDS[self.kind_weights.sample(&mut self.rng)];
        let value = 1 + self.value_weights.sample(&mut self.rng) as u8;
        Bonus::new(kind, value)
    }

    /// Reposition several players at once (scenario setup, worldgen)
    ///
    /// Listed players are lifted off the grid first, so destinations may
    /// overlap their previous cells. Every destination must be empty or held
    /// by a listed player; nothing is mutated on failure.
    pub fn place_players(&mut self, spots: &[(PlayerName, i32, i32)]) -> Result<()> {
        let mut indices = Vec::with_capacity(spots.len());
        for (name, _, _) in spots {
            indices.push(self.player_index(name)?);
        }

        for (i, (name, x, y)) in spots.iter().enumerate() {
            let free = match self.cell(*x, *y) {
                Some(Cell::Empty) => true,
                Some(Cell::Player(holder)) => spots.iter().any(|(n, _, _)| n == holder),
                _ => false,
            };
            let duplicate = spots[..i].iter().any(|(_, px, py)| (px, py) == (x, y));
            if !free || duplicate {
                return Err(GridError::InvalidMove(format!(
                    "cannot place {name} at ({x}, {y})"
                )));
            }
        }

        for &idx in &indices {
            let (x, y) = (self.players[idx].x, self.players[idx].y);
            let holds = matches!(self.cell(x, y), Some(Cell::Player(n)) if *n == self.players[idx].name);
            if holds {
                self.set_cell(x, y, Cell::Empty);
            }
        }
        for (&idx, &(_, x, y)) in indices.iter().zip(spots) {
            self.players[idx].x = x;
            self.players[idx].y = y;
            let name = self.players[idx].name.clone();
            self.set_cell(x, y, Cell::Player(name));
        }
        Ok(())
    }

    /// Put a bonus on an empty cell (scenario setup, worldgen)
    pub fn place_bonus(&mut self, x: i32, y: i32, bonus: Bonus) -> Result<()> {
        if !matches!(self.cell(x, y), Some(Cell::Empty)) {
            return Err(GridError::InvalidMove(format!(
                "cell ({x}, {y}) is not empty"
            )));
        }
        self.set_cell(x, y, Cell::Bonus(bonus));
        self.available_items += 1;
        Ok(())
    }

    /// Deep copy of the grid and player registry for agent views
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size_x: self.size_x,
            size_y: self.size_y,
            cells: self.cells.clone(),
            players: self.players.clone(),
        }
    }
}
