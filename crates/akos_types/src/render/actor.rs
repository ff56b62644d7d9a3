//! Actors: a costume instance plus everything the stage needs to place it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
	codec::constants::SCALE_IDENTITY,
	file::Costume,
	vm::{ActorId, CostumeState},
};

/// Palette override value meaning "use the costume palette"
pub const NO_OVERRIDE: u8 = 0xFF;

/// How an actor's cels are coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShadeMode {
	/// Through the resolved actor palette
	#[default]
	Normal,
	/// Stored indices through the stage shadow table
	Silhouette,
	/// Pixels behind the cel through the stage shadow table
	Behind,
}

/// One costume instance on stage
#[derive(Debug, Clone)]
pub struct Actor {
	id: ActorId,
	costume: Option<Arc<Costume>>,
	state: CostumeState,
	overrides: [u8; 256],
	/// Anchor x on the surface
	pub x: i32,
	/// Anchor y on the surface
	pub y: i32,
	/// Horizontal scale, 255 = 1:1
	pub scale_x: u8,
	/// Vertical scale, 255 = 1:1
	pub scale_y: u8,
	/// Facing; combined with the costume default and the bytecode flip
	pub mirror: bool,
	/// Colouring mode
	pub shade: ShadeMode,
	/// Whether the actor takes part in animate and draw passes
	pub visible: bool,
}

impl Actor {
	/// Creates a visible actor at the origin with no costume.
	pub fn new(id: ActorId) -> Self {
		Self {
			id,
			costume: None,
			state: CostumeState::new(),
			overrides: [NO_OVERRIDE; 256],
			x: 0,
			y: 0,
			scale_x: SCALE_IDENTITY,
			scale_y: SCALE_IDENTITY,
			mirror: false,
			shade: ShadeMode::Normal,
			visible: true,
		}
	}

	/// The actor id.
	pub fn id(&self) -> ActorId {
		self.id
	}

	/// The assigned costume.
	pub fn costume(&self) -> Option<&Arc<Costume>> {
		self.costume.as_ref()
	}

	/// Assigns a costume and resets the interpreter state.
	pub fn set_costume(&mut self, costume: Arc<Costume>) {
		self.costume = Some(costume);
		self.state = CostumeState::new();
	}

	/// Interpreter state of the current costume.
	pub fn state(&self) -> &CostumeState {
		&self.state
	}

	/// Interpreter state of the current costume, mutably.
	pub fn state_mut(&mut self) -> &mut CostumeState {
		&mut self.state
	}

	/// Moves the anchor.
	pub fn set_position(&mut self, x: i32, y: i32) {
		self.x = x;
		self.y = y;
	}

	/// Sets both scale factors.
	pub fn set_scale(&mut self, scale_x: u8, scale_y: u8) {
		self.scale_x = scale_x;
		self.scale_y = scale_y;
	}

	/// Overrides the colour of one stored index; [`NO_OVERRIDE`] restores the costume palette.
	pub fn set_palette(&mut self, index: u8, color: u8) {
		self.overrides[usize::from(index)] = color;
	}

	/// Drops every palette override.
	pub fn reset_palette(&mut self) {
		self.overrides = [NO_OVERRIDE; 256];
	}

	/// Maps every stored index to its final colour.
	///
	/// Overrides win; other indices go through the costume palette, and indices past its end map
	/// to themselves.
	pub fn resolved_palette(&self) -> [u8; 256] {
		let palette = self.costume.as_deref().map_or(&[][..], Costume::palette);
		std::array::from_fn(|index| match self.overrides[index] {
			NO_OVERRIDE => palette.get(index).copied().unwrap_or(index as u8),
			color => color,
		})
	}

	/// Returns true if the actor should be animated and drawn this frame.
	pub fn is_active(&self) -> bool {
		self.visible && self.costume.is_some() && !self.state.is_hidden()
	}

	pub(super) fn parts_mut(&mut self) -> Option<(&Costume, &mut CostumeState)> {
		let costume = self.costume.as_deref()?;
		Some((costume, &mut self.state))
	}
}
