//! The stage: actors, masks and the per-frame animate and draw passes.

use std::{
	collections::{BTreeMap, btree_map::Entry},
	sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
	StageError,
	codec::{BlitParams, MaskLayer, Rect, Shading, Surface, draw_cel},
	config::TitleConfig,
	file::{CelInfo, Costume},
	vm::{ActorId, AnimCommand, Interpreter, NUM_LIMBS, SideEffectSink},
};

use super::actor::{Actor, ShadeMode};

/// What one draw pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
	/// Limbs whose cel was decoded
	pub limbs_drawn: usize,
	/// Limbs whose cel could not be looked up or decoded
	pub limbs_skipped: usize,
	/// Union of the rectangles written
	pub dirty: Rect,
}

/// Owns the actors of a scene and drives the interpreter and the cel decoder for them.
///
/// A frame is an [`animate`](Self::animate) pass followed by a [`draw`](Self::draw) pass;
/// [`render_frame`](Self::render_frame) does both. `draw` never touches interpreter state, so it can
/// be repeated to redraw the same frame (after a palette change, for instance).
#[derive(Debug)]
pub struct Stage<S: SideEffectSink> {
	config: TitleConfig,
	interpreter: Interpreter<S>,
	actors: BTreeMap<ActorId, Actor>,
	zplanes: Vec<MaskLayer>,
	shadow: Option<[u8; 256]>,
	clip: Option<Rect>,
}

impl<S: SideEffectSink> Stage<S> {
	/// Creates an empty stage.
	pub fn new(config: TitleConfig, sink: S) -> Self {
		Self {
			interpreter: Interpreter::new(config.interpreter, config.byte_order, sink),
			actors: BTreeMap::new(),
			zplanes: Vec::new(),
			shadow: None,
			clip: config.clip,
			config,
		}
	}

	/// The title configuration.
	pub fn config(&self) -> &TitleConfig {
		&self.config
	}

	/// The interpreter.
	pub fn interpreter(&self) -> &Interpreter<S> {
		&self.interpreter
	}

	/// The interpreter, mutably.
	pub fn interpreter_mut(&mut self) -> &mut Interpreter<S> {
		&mut self.interpreter
	}

	/// Puts a fresh actor on stage, replacing any actor with the same id.
	pub fn add_actor(&mut self, id: ActorId) -> &mut Actor {
		match self.actors.entry(id) {
			Entry::Occupied(mut entry) => {
				log::debug!("Replacing actor {id}");
				entry.insert(Actor::new(id));
				entry.into_mut()
			}
			Entry::Vacant(entry) => entry.insert(Actor::new(id)),
		}
	}

	/// Looks up an actor.
	pub fn actor(&self, id: ActorId) -> Option<&Actor> {
		self.actors.get(&id)
	}

	/// Looks up an actor, mutably.
	pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
		self.actors.get_mut(&id)
	}

	/// Takes an actor off stage.
	pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
		self.actors.remove(&id)
	}

	/// Number of actors on stage.
	pub fn actor_count(&self) -> usize {
		self.actors.len()
	}

	/// Iterates over actors in id order.
	pub fn actors(&self) -> impl Iterator<Item = &Actor> {
		self.actors.values()
	}

	fn require(&mut self, id: ActorId) -> Result<&mut Actor, StageError> {
		self.actors.get_mut(&id).ok_or(StageError::UnknownActor(id))
	}

	/// Gives an actor a costume. Its interpreter state starts over, frozen limbs included.
	///
	/// # Errors
	///
	/// Returns [`StageError::UnknownActor`] if no actor has this id.
	pub fn set_costume(&mut self, id: ActorId, costume: Arc<Costume>) -> Result<(), StageError> {
		self.require(id)?.set_costume(costume);
		Ok(())
	}

	/// Starts animation `anim` on an actor right away.
	///
	/// Returns `Ok(false)` if the costume leaves the animation empty.
	///
	/// # Errors
	///
	/// Returns an error for an unknown actor, an actor without costume, or an invalid animation.
	pub fn start_animation(&mut self, id: ActorId, anim: u16) -> Result<bool, StageError> {
		let byte_order = self.config.byte_order;
		let (costume, state) = self.require(id)?.parts_mut().ok_or(StageError::NoCostume(id))?;
		Ok(state.start_animation(costume, anim, byte_order)?)
	}

	/// Makes an actor visible again, undoing `HideActor` as well.
	///
	/// # Errors
	///
	/// Returns [`StageError::UnknownActor`] if no actor has this id.
	pub fn show_actor(&mut self, id: ActorId) -> Result<(), StageError> {
		let actor = self.require(id)?;
		actor.visible = true;
		actor.state_mut().set_hidden(false);
		Ok(())
	}

	/// Hides an actor without touching its interpreter state.
	///
	/// # Errors
	///
	/// Returns [`StageError::UnknownActor`] if no actor has this id.
	pub fn hide_actor(&mut self, id: ActorId) -> Result<(), StageError> {
		self.require(id)?.visible = false;
		Ok(())
	}

	/// Replaces the z-plane masks. `SetActorClip n` selects mask `n - 1`.
	pub fn set_zplanes(&mut self, zplanes: Vec<MaskLayer>) {
		self.zplanes = zplanes;
	}

	/// Appends a z-plane mask and returns the clip mode that selects it.
	///
	/// # Errors
	///
	/// Returns [`StageError::TooManyZPlanes`] once 255 planes are set; the mask is not added.
	pub fn add_zplane(&mut self, zplane: MaskLayer) -> Result<u8, StageError> {
		let mode = u8::try_from(self.zplanes.len() + 1).map_err(|_| StageError::TooManyZPlanes {
			max: usize::from(u8::MAX),
		})?;
		self.zplanes.push(zplane);
		Ok(mode)
	}

	/// The z-plane masks.
	pub fn zplanes(&self) -> &[MaskLayer] {
		&self.zplanes
	}

	/// Sets the table used by [`ShadeMode::Silhouette`] and [`ShadeMode::Behind`].
	pub fn set_shadow_table(&mut self, table: Option<[u8; 256]>) {
		self.shadow = table;
	}

	/// Sets the clip rectangle applied to every blit; `None` clips to the surface.
	pub fn set_clip(&mut self, clip: Option<Rect>) {
		self.clip = clip;
	}

	/// The cel limb `limb` of an actor currently shows.
	pub fn limb_cel(&self, id: ActorId, limb: usize) -> Option<u16> {
		self.actors.get(&id)?.state().limb(limb)?.cel()
	}

	/// Steps every limb of every active actor once, then applies the queued animation commands.
	pub fn animate(&mut self) {
		for (&id, actor) in &mut self.actors {
			if !actor.is_active() {
				continue;
			}
			if let Some((costume, state)) = actor.parts_mut() {
				self.interpreter.animate(id, costume, state);
			}
		}
		self.apply_queue();
	}

	fn apply_queue(&mut self) {
		let byte_order = self.config.byte_order;
		let commands: Vec<_> = self.interpreter.queue_mut().drain().collect();
		for command in commands {
			let target = self.actors.get_mut(&command.actor()).and_then(Actor::parts_mut);
			let Some((costume, state)) = target else {
				log::warn!("Dropping {command:?}: actor {} is not on stage", command.actor());
				continue;
			};
			match command {
				AnimCommand::Start {
					anim,
					..
				} => {
					if let Err(err) = state.start_animation(costume, anim, byte_order) {
						log::warn!("Dropping {command:?}: {err}");
					}
				}
				AnimCommand::SetVar {
					limb,
					var,
					value,
					..
				} => match state.limb_mut(limb) {
					Some(target) => {
						target.set_var(var, value);
					}
					None => log::warn!("Dropping {command:?}: no limb {limb}"),
				},
			}
		}
	}

	/// Draws every active actor into `surface` without stepping the interpreter.
	///
	/// Actors are drawn by ascending `y`, then id; limbs by ascending index. Each limb's cel is
	/// offset by the `move_x`/`move_y` of the limbs drawn before it.
	pub fn draw(&self, surface: &mut Surface<'_>) -> FrameStats {
		let mut order: Vec<&Actor> = self.actors.values().filter(|actor| actor.is_active()).collect();
		order.sort_by_key(|actor| (actor.y, actor.id()));

		let mut stats = FrameStats::default();
		for actor in order {
			self.draw_actor(surface, actor, &mut stats);
		}
		stats
	}

	fn draw_actor(&self, surface: &mut Surface<'_>, actor: &Actor, stats: &mut FrameStats) {
		let Some(costume) = actor.costume() else {
			return;
		};
		let state = actor.state();
		let palette = actor.resolved_palette();
		let shading = match (actor.shade, &self.shadow) {
			(ShadeMode::Silhouette, Some(table)) => Shading::Silhouette(table),
			(ShadeMode::Behind, Some(table)) => Shading::Behind(table),
			_ => Shading::Palette,
		};
		let mask = match state.clip_mode() {
			0 => None,
			mode => {
				let plane = self.zplanes.get(usize::from(mode) - 1);
				if plane.is_none() {
					log::debug!("Actor {} selects missing z-plane {mode}", actor.id());
				}
				plane.map(MaskLayer::as_plane)
			}
		};
		let (offset_x, offset_y) = state.draw_offset();

		let mut params = BlitParams::new(&palette, costume.cel_format(self.config.byte_order))
			.at(actor.x + offset_x, actor.y + offset_y)
			.scaled(actor.scale_x, actor.scale_y)
			.mirrored(actor.mirror ^ costume.header().mirror_default() ^ state.is_flipped());
		params.clip = self.clip;
		params.mask = mask;
		params.shading = shading;

		let (mut move_x, mut move_y) = (0i16, 0i16);
		for limb in 0..NUM_LIMBS {
			let Some(cel) = state.frame(limb).cel else {
				continue;
			};
			let (info, data) = match costume.cel(cel) {
				Ok(found) => found,
				Err(err) => {
					log::warn!("Actor {} limb {limb}: {err}", actor.id());
					stats.limbs_skipped += 1;
					continue;
				}
			};
			let placed = CelInfo {
				rel_x: info.rel_x.wrapping_add(move_x),
				rel_y: info.rel_y.wrapping_add(move_y),
				..info
			};
			match draw_cel(surface, &placed, data, &params) {
				Ok(dirty) => {
					stats.limbs_drawn += 1;
					stats.dirty = stats.dirty.union(&dirty);
				}
				Err(err) => {
					log::warn!("Actor {} limb {limb} cel {cel}: {err}", actor.id());
					stats.limbs_skipped += 1;
				}
			}
			move_x = move_x.wrapping_add(info.move_x);
			move_y = move_y.wrapping_add(info.move_y);
		}
	}

	/// Animates, then draws.
	pub fn render_frame(&mut self, surface: &mut Surface<'_>) -> FrameStats {
		self.animate();
		self.draw(surface)
	}
}
