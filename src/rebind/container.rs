//! Input box aggregation and the swap/cancel protocol
//!
//! The `InputContainer` owns every [`InputBox`] of a rebinding screen.
//! It is the only component allowed to decide which key goes to which
//! action: candidate keys pass the whitelist/blacklist filter, then the
//! column's device restriction, then the cross-action collision scan,
//! in that order. The order decides which revert reason is reported,
//! and a disallowed key must never be offered for a swap.
//!
//! The container holds injected handles to its collaborators (mapping
//! store, defaults provider, HMD detector, observer, swap confirmer),
//! keeping the protocol testable without an engine or a display.

use crate::core::restriction::{respects_restriction, HmdDetector, InputRestriction, NoHmd};
use crate::core::types::{Key, Modifier};
use crate::core::validator::{KeyFilter, RevertReason};
use crate::rebind::input_box::{InputBox, SlotBinding};
use crate::rebind::{
    InputCollisionData, NoSwap, NullObserver, RebindError, RebindObserver, RebindOutcome,
    SwapConfirmer,
};
use crate::store::{DefaultsProvider, MappingStore};

/// Direction for moving focus between input boxes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Verdict of [`InputContainer::can_use_key`] when the key is allowed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyVerdict {
    /// No other slot uses the key; the rebind may commit directly.
    Free,
    /// Another slot already holds the key. Indices name the first match
    /// in (box index ascending, slot index ascending) order.
    Collision { box_index: usize, slot_index: usize },
}

/// Construction metadata for one input box.
#[derive(Clone, Debug)]
pub struct ActionConfig {
    /// Action name as known by the mapping store (e.g., "Jump")
    pub name: String,

    /// Name shown in the row header; defaults to the action name
    pub display_name: Option<String>,

    /// The opposite action of a positive/negative pair, if any
    pub paired_action: Option<String>,
}

impl ActionConfig {
    /// Creates metadata for a plain action.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: None,
            paired_action: None,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    /// Declares the opposite action of a positive/negative pair.
    pub fn with_paired_action(mut self, paired_action: &str) -> Self {
        self.paired_action = Some(paired_action.to_string());
        self
    }
}

/// Container-wide rebinding configuration.
///
/// Read-only during a rebind session.
#[derive(Clone, Debug)]
pub struct ContainerConfig {
    /// Number of parallel key slots per action (commonly 1-3)
    pub keys_per_action: usize,

    /// Global key allow/deny filter (whitelist overrides blacklist)
    pub filter: KeyFilter,

    /// Device restriction per column, indexed by slot position.
    /// Missing entries mean no restriction.
    pub restrictions: Vec<InputRestriction>,

    /// Whether a collision offers a swap; when false collisions are
    /// cancelled outright
    pub enable_swap: bool,

    /// Width of the navigation grid the boxes are laid out in
    pub grid_columns: usize,

    /// Label for unbound slots
    pub empty_key_text: String,

    /// Prompt shown while a slot is listening
    pub press_key_text: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            keys_per_action: 1,
            filter: KeyFilter::default(),
            restrictions: Vec::new(),
            enable_swap: true,
            grid_columns: 1,
            empty_key_text: "Unbound".to_string(),
            press_key_text: "Press Any Key".to_string(),
        }
    }
}

/// Aggregates the input boxes of a rebinding screen and drives the
/// rebind protocol.
///
/// # Example
///
/// ```no_run
/// use rebind_manager::rebind::{ActionConfig, ContainerConfig, InputContainer};
/// use rebind_manager::store::{FileMappingStore, StaticDefaults};
/// use rebind_manager::core::types::Key;
///
/// let store = FileMappingStore::open("/tmp/inputmap.conf".into())?;
/// let mut container = InputContainer::new(
///     ContainerConfig::default(),
///     Box::new(store),
///     Box::new(StaticDefaults::default()),
/// );
/// container.setup(&[ActionConfig::new("Jump"), ActionConfig::new("Crouch")]);
///
/// container.begin_rebind(0, 0)?;
/// let outcome = container.handle_key_press(Key::new("F"), Vec::new())?;
/// println!("{outcome:?}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct InputContainer {
    config: ContainerConfig,
    boxes: Vec<InputBox>,
    store: Box<dyn MappingStore>,
    defaults: Box<dyn DefaultsProvider>,
    hmd: Box<dyn HmdDetector>,
    observer: Box<dyn RebindObserver>,
    swap: Box<dyn SwapConfirmer>,
    /// The single slot allowed to listen, as (box index, slot index)
    listening: Option<(usize, usize)>,
    setup_errors: Vec<RebindError>,
}

impl InputContainer {
    /// Creates a container with no-op collaborators for HMD detection,
    /// observation and swap confirmation. Call [`setup`](Self::setup) to
    /// build the input boxes.
    pub fn new(
        config: ContainerConfig,
        store: Box<dyn MappingStore>,
        defaults: Box<dyn DefaultsProvider>,
    ) -> Self {
        Self {
            config,
            boxes: Vec::new(),
            store,
            defaults,
            hmd: Box::new(NoHmd),
            observer: Box::new(NullObserver),
            swap: Box::new(NoSwap),
            listening: None,
            setup_errors: Vec::new(),
        }
    }

    /// Replaces the HMD detector used by the `Vr` restriction.
    pub fn with_hmd_detector(mut self, hmd: Box<dyn HmdDetector>) -> Self {
        self.hmd = hmd;
        self
    }

    /// Replaces the notification sink.
    pub fn with_observer(mut self, observer: Box<dyn RebindObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replaces the swap confirmation callback.
    pub fn with_swap_confirmer(mut self, swap: Box<dyn SwapConfirmer>) -> Self {
        self.swap = swap;
        self
    }

    /// Builds one input box per action from the store's current
    /// mappings.
    ///
    /// An action with zero mappings is a misconfiguration: the box is
    /// skipped, the problem is logged at error level and recorded in
    /// [`setup_errors`](Self::setup_errors). The container stays usable
    /// for the remaining actions. `on_add_input_box` fires for each box
    /// that was built.
    pub fn setup(&mut self, actions: &[ActionConfig]) {
        self.boxes.clear();
        self.setup_errors.clear();
        self.listening = None;

        for action_config in actions {
            let mappings = self.store.mappings_for_action(&action_config.name);
            if mappings.is_empty() {
                log::error!(
                    "couldn't find any mapping for action '{}'",
                    action_config.name
                );
                self.setup_errors
                    .push(RebindError::NoActionFound(action_config.name.clone()));
                continue;
            }

            let input_box = InputBox::build(
                action_config,
                self.config.keys_per_action,
                &self.config.empty_key_text,
                &self.config.press_key_text,
                &mappings,
            );
            self.observer.on_add_input_box(input_box.action());
            self.boxes.push(input_box);
        }
    }

    /// Misconfigurations found during [`setup`](Self::setup).
    pub fn setup_errors(&self) -> &[RebindError] {
        &self.setup_errors
    }

    /// All input boxes in construction order.
    pub fn input_boxes(&self) -> &[InputBox] {
        &self.boxes
    }

    /// A single input box by index.
    pub fn input_box(&self, index: usize) -> Option<&InputBox> {
        self.boxes.get(index)
    }

    /// The slot currently listening, as (box index, slot index).
    pub fn listening(&self) -> Option<(usize, usize)> {
        self.listening
    }

    /// The container configuration.
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Checks whether a candidate key may be bound to the given slot.
    ///
    /// Check order is fixed: whitelist, blacklist, column restriction,
    /// then the collision scan over every other bound slot in (box
    /// index ascending, slot index ascending) order. `Err` carries the
    /// filter/restriction reason; a collision is returned as
    /// [`KeyVerdict::Collision`] naming the first match.
    pub fn can_use_key(
        &self,
        box_index: usize,
        slot_index: usize,
        key: &Key,
    ) -> Result<KeyVerdict, RevertReason> {
        self.config.filter.check(key)?;

        let restriction = self
            .config
            .restrictions
            .get(slot_index)
            .copied()
            .unwrap_or_default();
        let family = self.hmd.current_family();
        if !respects_restriction(key, restriction, family.as_deref()) {
            return Err(RevertReason::RestrictionMismatch);
        }

        for (bi, input_box) in self.boxes.iter().enumerate() {
            for (si, slot) in input_box.slots().iter().enumerate() {
                if bi == box_index && si == slot_index {
                    continue;
                }
                if slot.bound_key() == Some(key) {
                    return Ok(KeyVerdict::Collision {
                        box_index: bi,
                        slot_index: si,
                    });
                }
            }
        }

        Ok(KeyVerdict::Free)
    }

    /// Classifies [`can_use_key`](Self::can_use_key) into the reason a
    /// rebind would revert, or `None` when it can proceed directly.
    ///
    /// Collisions report [`RevertReason::UsedByAnotherAction`]; they go
    /// to the swap flow instead of an outright rejection.
    pub fn can_register_key(
        &self,
        box_index: usize,
        slot_index: usize,
        key: &Key,
    ) -> Option<RevertReason> {
        match self.can_use_key(box_index, slot_index, key) {
            Err(reason) => Some(reason),
            Ok(KeyVerdict::Collision { .. }) => Some(RevertReason::UsedByAnotherAction),
            Ok(KeyVerdict::Free) => None,
        }
    }

    /// Puts a slot into the listening state.
    ///
    /// Only one slot per container may listen: a slot already listening
    /// elsewhere is cancelled first (display reverted, no notification).
    pub fn begin_rebind(&mut self, box_index: usize, slot_index: usize) -> Result<(), RebindError> {
        let input_box = self
            .boxes
            .get(box_index)
            .ok_or(RebindError::BoxIndexOutOfRange(box_index))?;
        if slot_index >= input_box.slots().len() {
            return Err(RebindError::SlotIndexOutOfRange {
                action: input_box.action().to_string(),
                slot: slot_index,
            });
        }

        if let Some((other_box, other_slot)) = self.listening {
            if (other_box, other_slot) != (box_index, slot_index) {
                if let Some(b) = self.boxes.get_mut(other_box) {
                    b.cancel(other_slot);
                }
            }
        }

        if let Some(b) = self.boxes.get_mut(box_index) {
            b.begin_listening(slot_index);
        }
        self.listening = Some((box_index, slot_index));

        Ok(())
    }

    /// Cancels the listening slot, reverting its display. No-op when
    /// nothing is listening; fires no notification (the player backed
    /// out, no key was rejected).
    pub fn cancel_rebind(&mut self) {
        if let Some((box_index, slot_index)) = self.listening.take() {
            if let Some(b) = self.boxes.get_mut(box_index) {
                b.cancel(slot_index);
            }
        }
    }

    /// Applies a pressed key to the listening slot.
    ///
    /// Runs the full protocol: validation, collision scan, swap prompt,
    /// store commit and notifications. Returns the outcome, or
    /// [`RebindError::NotListening`] when no rebind is in progress.
    ///
    /// Persistence is best-effort: when the store fails to persist, the
    /// in-memory bindings and the notifications already reflect the
    /// change and the store error is returned for the host to report.
    pub fn handle_key_press(
        &mut self,
        key: Key,
        modifiers: Vec<Modifier>,
    ) -> Result<RebindOutcome, RebindError> {
        let (box_index, slot_index) = self.listening.ok_or(RebindError::NotListening)?;

        match self.can_use_key(box_index, slot_index, &key) {
            Err(reason) => {
                self.listening = None;
                if let Some(b) = self.boxes.get_mut(box_index) {
                    b.cancel(slot_index);
                }
                self.observer.on_rebind_cancelled(reason, &key);
                Ok(RebindOutcome::Cancelled(reason))
            }
            Ok(KeyVerdict::Free) => self.commit_rebind(box_index, slot_index, key, modifiers),
            Ok(KeyVerdict::Collision {
                box_index: colliding_box,
                slot_index: colliding_slot,
            }) => self.resolve_collision(
                box_index,
                slot_index,
                colliding_box,
                colliding_slot,
                key,
                modifiers,
            ),
        }
    }

    /// Restores every action to its default mappings.
    ///
    /// Per action: remove the current store entries, add the defaults
    /// (possibly none). One persist and one runtime-table rebuild cover
    /// the whole reset, then every box is reseeded from the store.
    /// Calling this twice in a row yields the same bindings as once.
    pub fn reset_key_mappings(&mut self) -> Result<(), RebindError> {
        self.cancel_rebind();

        let actions: Vec<String> = self.boxes.iter().map(|b| b.action().to_string()).collect();
        for action in &actions {
            for mapping in self.store.mappings_for_action(action) {
                self.store.remove_mapping(&mapping);
            }
            for mapping in self.defaults.default_mappings_for_action(action) {
                self.store.add_mapping(mapping);
            }
        }

        let persisted = self.store.persist();
        self.store.rebuild_runtime_tables();

        for index in 0..self.boxes.len() {
            let mappings = self.store.mappings_for_action(self.boxes[index].action());
            self.boxes[index].rebuild_from(&mappings);
        }

        if let Err(e) = persisted {
            log::warn!("mapping store persist failed after reset: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Returns the input box adjacent to `index` in the given direction
    /// within the navigation grid, or `None` at a grid edge.
    pub fn input_box_in_direction(&self, index: usize, direction: NavDirection) -> Option<usize> {
        if index >= self.boxes.len() {
            return None;
        }

        let columns = self.config.grid_columns.max(1);
        let row = index / columns;
        let column = index % columns;

        let (row, column) = match direction {
            NavDirection::Up => (row.checked_sub(1)?, column),
            NavDirection::Down => (row + 1, column),
            NavDirection::Left => (row, column.checked_sub(1)?),
            NavDirection::Right => {
                if column + 1 >= columns {
                    return None;
                }
                (row, column + 1)
            }
        };

        let target = row * columns + column;
        (target < self.boxes.len()).then_some(target)
    }

    /// Returns the box of the given box's paired action (the opposite
    /// half of a positive/negative pair), if both exist.
    pub fn opposite_input_box(&self, index: usize) -> Option<usize> {
        let paired = self.boxes.get(index)?.paired_action()?;
        self.boxes.iter().position(|b| b.action() == paired)
    }

    /// Commits a collision-free rebind.
    fn commit_rebind(
        &mut self,
        box_index: usize,
        slot_index: usize,
        key: Key,
        modifiers: Vec<Modifier>,
    ) -> Result<RebindOutcome, RebindError> {
        let action = self.boxes[box_index].action().to_string();
        let binding = SlotBinding::new(key.clone(), modifiers);
        let new_mapping = binding.to_mapping(&action);

        let previous = self.boxes[box_index].apply_binding(slot_index, binding);
        self.listening = None;

        if let Some(prev) = &previous {
            self.store.remove_mapping(&prev.to_mapping(&action));
        }
        self.store.add_mapping(new_mapping);
        let persisted = self.store.persist();
        self.store.rebuild_runtime_tables();

        self.observer
            .on_key_rebinded(&action, previous.as_ref().map(|b| &b.key), &key);
        log::info!("rebound '{}' slot {} to {}", action, slot_index, key.name());

        if let Err(e) = persisted {
            log::warn!("mapping store persist failed after rebind: {e}");
            return Err(e.into());
        }
        Ok(RebindOutcome::Bound {
            action,
            slot: slot_index,
        })
    }

    /// Resolves a collision through the swap prompt.
    fn resolve_collision(
        &mut self,
        box_index: usize,
        slot_index: usize,
        colliding_box: usize,
        colliding_slot: usize,
        key: Key,
        modifiers: Vec<Modifier>,
    ) -> Result<RebindOutcome, RebindError> {
        let current_action = self.boxes[box_index].action().to_string();
        let colliding_action = self.boxes[colliding_box].action().to_string();

        let current_prev = self.boxes[box_index]
            .slot(slot_index)
            .and_then(|s| s.binding().cloned());
        let Some(colliding_prev) = self.boxes[colliding_box]
            .slot(colliding_slot)
            .and_then(|s| s.binding().cloned())
        else {
            // Collision scan only matches bound slots; stay safe anyway.
            return self.commit_rebind(box_index, slot_index, key, modifiers);
        };

        let collision = InputCollisionData {
            current_action: current_action.clone(),
            colliding_action: colliding_action.clone(),
            pressed_key: key.clone(),
            current_key: current_prev.as_ref().map(|b| b.key.clone()),
            colliding_key: colliding_prev.key.clone(),
        };

        let accepted = self.config.enable_swap && self.swap.confirm_swap(&collision);
        if !accepted {
            self.listening = None;
            if let Some(b) = self.boxes.get_mut(box_index) {
                b.cancel(slot_index);
            }
            self.observer
                .on_rebind_cancelled(RevertReason::UsedByAnotherAction, &key);
            return Ok(RebindOutcome::Cancelled(RevertReason::UsedByAnotherAction));
        }

        // True exchange: the current slot takes the pressed key, the
        // colliding slot takes the current slot's previous binding (or
        // becomes unbound when there was none).
        let new_binding = SlotBinding::new(key.clone(), modifiers);
        let new_mapping = new_binding.to_mapping(&current_action);
        let prev_current = self.boxes[box_index].apply_binding(slot_index, new_binding);
        match &prev_current {
            Some(prev) => {
                self.boxes[colliding_box].apply_binding(colliding_slot, prev.clone());
            }
            None => {
                self.boxes[colliding_box].mark_unbound(colliding_slot);
            }
        }
        self.listening = None;

        self.store
            .remove_mapping(&colliding_prev.to_mapping(&colliding_action));
        if let Some(prev) = &prev_current {
            self.store.remove_mapping(&prev.to_mapping(&current_action));
            self.store.add_mapping(prev.to_mapping(&colliding_action));
        }
        self.store.add_mapping(new_mapping);
        let persisted = self.store.persist();
        self.store.rebuild_runtime_tables();

        self.observer
            .on_key_rebinded(&current_action, prev_current.as_ref().map(|b| &b.key), &key);
        if let Some(prev) = &prev_current {
            self.observer
                .on_key_rebinded(&colliding_action, Some(&colliding_prev.key), &prev.key);
        }
        log::info!(
            "swapped '{}' and '{}' over {}",
            current_action,
            colliding_action,
            key.name()
        );

        if let Err(e) = persisted {
            log::warn!("mapping store persist failed after swap: {e}");
            return Err(e.into());
        }
        Ok(RebindOutcome::Swapped {
            action: current_action,
            other_action: colliding_action,
        })
    }
}
