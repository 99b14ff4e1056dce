//! Slot engine: owns one slot collection and orchestrates store, factory, and persistence.
//!
//! Every mutating entry point runs the pure [`reduce_slots`] transition, projects the resulting
//! effects onto rendered items, and persists the full layout once before returning. Records are
//! authoritative; rendered items are projections that can always be rebuilt from them.

use std::collections::HashMap;

use leptos::logging;
use platform_host::HostServices;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::SlotEngineConfig,
    drag::{DragDropAdapter, PointerInput},
    error::SlotError,
    factory::{ItemControls, ItemFactory, ItemMount, RenderableItem},
    model::{InteractionState, ItemId, ItemRecord, Motion, PixelOffset, SlotId},
    persistence::{load_layout, save_layout},
    reducer::{reduce_slots, SlotAction, SlotEffect, SlotLayout},
    registry::SlotRegistry,
    store::{ItemStore, RestoreReport},
};

const NO_EMPTY_SLOT_TITLE: &str = "No empty slot";

pub struct SlotEngine<P, F: ItemFactory<P>> {
    config: SlotEngineConfig,
    host: HostServices,
    layout: SlotLayout<P>,
    interaction: InteractionState,
    drag: DragDropAdapter,
    factory: Option<F>,
    rendered: HashMap<ItemId, F::Item>,
    pending_renders: Vec<ItemId>,
}

impl<P, F> SlotEngine<P, F>
where
    P: Clone + Serialize + DeserializeOwned,
    F: ItemFactory<P>,
{
    /// Builds an engine with an empty store and no factory attached.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidConfig`] when `config` fails validation.
    pub fn new(config: SlotEngineConfig, host: HostServices) -> Result<Self, SlotError> {
        config.validate()?;
        let registry = SlotRegistry::from_config(&config.slot_config);
        Ok(Self {
            config,
            host,
            layout: SlotLayout::new(registry),
            interaction: InteractionState::default(),
            drag: DragDropAdapter::default(),
            factory: None,
            rendered: HashMap::new(),
            pending_renders: Vec::new(),
        })
    }

    pub fn config(&self) -> &SlotEngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.layout.registry
    }

    /// Live records in insertion order.
    pub fn items(&self) -> &[ItemRecord<P>] {
        self.layout.store.records()
    }

    pub fn item(&self, item_id: ItemId) -> Option<&ItemRecord<P>> {
        self.layout.store.get(item_id)
    }

    pub fn rendered_item(&self, item_id: ItemId) -> Option<&F::Item> {
        self.rendered.get(&item_id)
    }

    /// First slot in declaration order without a live item, or `None` when the grid is full.
    pub fn find_empty_slot(&self) -> Option<SlotId> {
        self.layout.find_empty_slot().cloned()
    }

    pub fn is_factory_attached(&self) -> bool {
        self.factory.is_some()
    }

    /// Records waiting for a factory before they can be rendered.
    pub fn pending_renders(&self) -> &[ItemId] {
        &self.pending_renders
    }

    /// Attaches the item factory, replacing (and disposing through) any previous one.
    ///
    /// Records restored before a factory was available are rendered now.
    pub async fn set_item_factory(&mut self, factory: F) {
        if let Some(previous) = self.factory.take() {
            for (item_id, item) in self.rendered.drain() {
                previous.remove_item(item);
                self.pending_renders.push(item_id);
            }
        }
        self.factory = Some(factory);
        self.render_pending().await;
    }

    /// Rebuilds the store from the persisted blob and renders every placeable record.
    ///
    /// A missing or corrupt blob yields an empty store. Records naming slots outside the current
    /// registry are dropped from the live store and counted in the report.
    pub async fn restore(&mut self) -> RestoreReport {
        let records = match load_layout::<P>(&*self.host.prefs, &self.config.storage_key).await {
            Ok(records) => records.unwrap_or_default(),
            Err(err) => {
                logging::warn!(
                    "restoring `{}` on {} host failed, starting empty: {err}",
                    self.config.storage_key,
                    self.host.host_strategy.as_str()
                );
                Vec::new()
            }
        };

        self.dispose_rendered();
        self.interaction = InteractionState::default();
        self.drag.reset();

        let (store, report) = ItemStore::from_records(records, &self.layout.registry);
        self.pending_renders = store.records().iter().map(|record| record.id).collect();
        self.layout.store = store;
        self.render_pending().await;
        report
    }

    /// Places `payload` in the first empty slot.
    ///
    /// # Errors
    ///
    /// See [`SlotEngine::add_item_with_data`].
    pub async fn add_item(&mut self, payload: P) -> Result<ItemRecord<P>, SlotError> {
        self.add_item_with_data(payload, None).await
    }

    /// Places `payload` in `target`, or in the first empty slot when `target` is `None`.
    ///
    /// A full grid is reported to the user through the host notification sink. Occupancy is
    /// checked again when the rendered item is committed, so a slot filled while the factory was
    /// working fails with [`SlotError::SlotOccupied`] instead of double-booking.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::FactoryMissing`], [`SlotError::NoEmptySlot`],
    /// [`SlotError::UnknownSlot`], [`SlotError::SlotOccupied`], or
    /// [`SlotError::FactoryDeclined`]; no record is stored in any of these cases.
    pub async fn add_item_with_data(
        &mut self,
        payload: P,
        target: Option<SlotId>,
    ) -> Result<ItemRecord<P>, SlotError> {
        if self.factory.is_none() {
            logging::warn!("add to `{}` aborted: no item factory", self.config.storage_key);
            return Err(SlotError::FactoryMissing);
        }

        let slot_id = match target {
            Some(slot_id) => {
                if !self.layout.registry.contains(&slot_id) {
                    return Err(SlotError::UnknownSlot { slot_id });
                }
                if self.layout.store.is_occupied(&slot_id) {
                    return Err(SlotError::SlotOccupied { slot_id });
                }
                slot_id
            }
            None => match self.find_empty_slot() {
                Some(slot_id) => slot_id,
                None => {
                    self.notify_no_empty_slot().await;
                    return Err(SlotError::NoEmptySlot);
                }
            },
        };

        let item_id = self.layout.store.reserve_id();
        let Some(factory) = self.factory.as_ref() else {
            return Err(SlotError::FactoryMissing);
        };
        let Some(item) = factory
            .create_item(item_id, &payload, &slot_id, PixelOffset::ORIGIN)
            .await
        else {
            return Err(SlotError::FactoryDeclined { item_id });
        };

        let record = ItemRecord::new(item_id, payload, slot_id);
        match reduce_slots(
            &mut self.layout,
            &mut self.interaction,
            SlotAction::Place(record.clone()),
        ) {
            Ok(effects) => {
                self.rendered.insert(item_id, item);
                self.attach_controls(item_id);
                self.run_effects(effects).await;
                Ok(record)
            }
            Err(err) => {
                factory.remove_item(item);
                Err(err)
            }
        }
    }

    /// Plays the exit transition, disposes the rendered item, and deletes the record.
    ///
    /// Returns `false` without touching anything when the id is unknown or the item is already
    /// being removed.
    pub async fn remove_item(&mut self, item_id: ItemId) -> bool {
        if self.layout.store.get(item_id).is_none() || self.interaction.is_busy(item_id) {
            return false;
        }
        if let Err(err) = self.reduce_only(SlotAction::BeginRemove { item_id }) {
            logging::warn!("remove {item_id} rejected: {err}");
            return false;
        }
        if self.drag.active_item() == Some(item_id) {
            self.drag.reset();
        }

        if let Some(mut item) = self.rendered.remove(&item_id) {
            item.exit_transition().await;
            match self.factory.as_ref() {
                Some(factory) => factory.remove_item(item),
                None => drop(item),
            }
        }
        self.pending_renders.retain(|pending| *pending != item_id);

        match self.dispatch(SlotAction::Remove { item_id }).await {
            Ok(()) => true,
            Err(err) => {
                logging::warn!("remove {item_id} failed: {err}");
                false
            }
        }
    }

    /// Moves an item into `target`, swapping with a different occupant.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::ItemNotFound`], [`SlotError::UnknownSlot`], or
    /// [`SlotError::ItemBusy`] without mutating.
    pub async fn move_item(&mut self, item_id: ItemId, target: SlotId) -> Result<(), SlotError> {
        self.dispatch(SlotAction::MoveItem { item_id, target }).await
    }

    /// Exchanges the slots of two items with a single persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::ItemNotFound`] when either item is unknown.
    pub async fn swap_items(&mut self, first: ItemId, second: ItemId) -> Result<(), SlotError> {
        let target = self
            .layout
            .store
            .get(second)
            .map(|record| record.slot_id.clone())
            .ok_or(SlotError::ItemNotFound { item_id: second })?;
        self.move_item(first, target).await
    }

    /// Replaces an item's payload, re-renders it in place, and persists.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::ItemNotFound`] or [`SlotError::ItemBusy`].
    pub async fn update_item_payload(&mut self, item_id: ItemId, data: P) -> Result<(), SlotError> {
        self.dispatch(SlotAction::UpdatePayload { item_id, data })
            .await
    }

    /// Records an explicit offset for an item inside its current slot and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::ItemNotFound`] or [`SlotError::ItemBusy`].
    pub async fn set_item_position(
        &mut self,
        item_id: ItemId,
        position: PixelOffset,
    ) -> Result<(), SlotError> {
        self.dispatch(SlotAction::SetPosition { item_id, position })
            .await
    }

    /// Feeds one pointer event through the drag/drop adapter.
    ///
    /// # Errors
    ///
    /// Returns the first reducer error; the gesture is abandoned in that case.
    pub async fn handle_pointer(&mut self, input: PointerInput) -> Result<(), SlotError> {
        let actions = self.drag.translate::<P>(input);
        for action in actions {
            if let Err(err) = self.dispatch(action).await {
                self.drag.reset();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Applies one reducer action and executes its effects, persisting at most once.
    ///
    /// # Errors
    ///
    /// Returns the reducer error; the layout is unchanged in that case.
    pub async fn dispatch(&mut self, action: SlotAction<P>) -> Result<(), SlotError> {
        let effects = reduce_slots(&mut self.layout, &mut self.interaction, action)?;
        self.run_effects(effects).await;
        Ok(())
    }

    /// Serializes the store into the persisted layout array without writing it.
    ///
    /// # Errors
    ///
    /// Returns an error when a payload fails to serialize.
    pub fn snapshot_json(&self) -> Result<String, String> {
        self.layout.store.to_json()
    }

    /// Overwrites the persisted blob with the current store and returns what was written.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the host write fails.
    pub async fn persist(&self) -> Result<String, String> {
        save_layout(
            &*self.host.prefs,
            &self.config.storage_key,
            &self.layout.store,
        )
        .await
    }

    fn reduce_only(&mut self, action: SlotAction<P>) -> Result<(), SlotError> {
        reduce_slots(&mut self.layout, &mut self.interaction, action).map(|_| ())
    }

    async fn run_effects(&mut self, effects: Vec<SlotEffect>) {
        let mut persist = false;
        for effect in effects {
            match effect {
                SlotEffect::PersistLayout => persist = true,
                SlotEffect::Mount {
                    item_id,
                    slot_id,
                    position,
                    motion,
                } => {
                    let mount = self.mount_for(slot_id, position, motion);
                    if let Some(item) = self.rendered.get_mut(&item_id) {
                        item.mount(&mount);
                    }
                }
                SlotEffect::SetOffset { item_id, position } => {
                    if let Some(item) = self.rendered.get_mut(&item_id) {
                        item.set_offset(position);
                    }
                }
                SlotEffect::SetDragging { item_id, dragging } => {
                    if let Some(item) = self.rendered.get_mut(&item_id) {
                        item.set_dragging(dragging);
                    }
                }
                SlotEffect::Rerender { item_id } => self.rerender(item_id).await,
            }
        }

        if persist {
            if let Err(err) = self.persist().await {
                logging::warn!("persist `{}` failed: {err}", self.config.storage_key);
            }
        }
    }

    async fn rerender(&mut self, item_id: ItemId) {
        let Some(factory) = self.factory.as_ref() else {
            return;
        };
        if let Some(previous) = self.rendered.remove(&item_id) {
            factory.remove_item(previous);
        }
        if !self.pending_renders.contains(&item_id) {
            self.pending_renders.push(item_id);
        }
        self.render_pending().await;
    }

    async fn render_pending(&mut self) {
        let Some(factory) = self.factory.as_ref() else {
            return;
        };
        for item_id in std::mem::take(&mut self.pending_renders) {
            let Some(record) = self.layout.store.get(item_id).cloned() else {
                continue;
            };
            let created = factory
                .create_item(item_id, &record.data, &record.slot_id, record.position)
                .await;
            let Some(mut item) = created else {
                logging::warn!(
                    "item factory declined {item_id} in slot {}; keeping its record",
                    record.slot_id
                );
                continue;
            };
            item.mount(&mount_for(
                &self.config,
                record.slot_id,
                record.position,
                Motion::Instant,
            ));
            item.attach_controls(&controls_for(item_id, &item));
            self.rendered.insert(item_id, item);
        }
    }

    fn attach_controls(&mut self, item_id: ItemId) {
        if let Some(item) = self.rendered.get_mut(&item_id) {
            let controls = controls_for(item_id, item);
            item.attach_controls(&controls);
        }
    }

    fn dispose_rendered(&mut self) {
        let rendered: Vec<_> = self.rendered.drain().collect();
        if let Some(factory) = self.factory.as_ref() {
            for (_, item) in rendered {
                factory.remove_item(item);
            }
        }
    }

    async fn notify_no_empty_slot(&self) {
        let body = format!(
            "All {} slots are occupied. Remove an item to make room.",
            self.layout.registry.len()
        );
        if let Err(err) = self
            .host
            .notifications
            .notify(NO_EMPTY_SLOT_TITLE, &body)
            .await
        {
            logging::warn!("no-empty-slot notice failed: {err}");
        }
    }

    fn mount_for(&self, slot_id: SlotId, offset: PixelOffset, motion: Motion) -> ItemMount {
        mount_for(&self.config, slot_id, offset, motion)
    }
}

fn mount_for(
    config: &SlotEngineConfig,
    slot_id: SlotId,
    offset: PixelOffset,
    motion: Motion,
) -> ItemMount {
    ItemMount {
        slot_selector: config.slot_selector(&slot_id),
        marker_class: config.item_marker_class.clone(),
        slot_id,
        offset,
        motion,
    }
}

fn controls_for<I: RenderableItem>(item_id: ItemId, item: &I) -> ItemControls {
    ItemControls {
        item_id,
        draggable: item.has_drag_handle(),
        removable: item.has_remove_control(),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;
    use platform_host::{MemoryNotificationService, MemoryPrefsStore};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::{factory::FactoryFuture, model::PointerPosition};

    #[derive(Debug, Default)]
    struct Trace {
        slot: Option<SlotId>,
        offset: PixelOffset,
        motions: Vec<Motion>,
        dragging: bool,
        controls: Option<ItemControls>,
        exited: bool,
    }

    struct TraceItem {
        trace: Rc<RefCell<Trace>>,
    }

    impl RenderableItem for TraceItem {
        fn mount(&mut self, mount: &ItemMount) {
            let mut trace = self.trace.borrow_mut();
            trace.slot = Some(mount.slot_id.clone());
            trace.offset = mount.offset;
            trace.motions.push(mount.motion);
        }

        fn set_offset(&mut self, offset: PixelOffset) {
            self.trace.borrow_mut().offset = offset;
        }

        fn set_dragging(&mut self, dragging: bool) {
            self.trace.borrow_mut().dragging = dragging;
        }

        fn attach_controls(&mut self, controls: &ItemControls) {
            self.trace.borrow_mut().controls = Some(*controls);
        }

        fn exit_transition(&mut self) -> FactoryFuture<'_, ()> {
            Box::pin(async move {
                self.trace.borrow_mut().exited = true;
            })
        }
    }

    #[derive(Default)]
    struct TraceFactory {
        traces: Rc<RefCell<HashMap<ItemId, Rc<RefCell<Trace>>>>>,
        disposed: Rc<RefCell<Vec<ItemId>>>,
        exited_before_dispose: Rc<RefCell<Vec<bool>>>,
    }

    impl ItemFactory<Value> for TraceFactory {
        type Item = TraceItem;

        fn create_item<'a>(
            &'a self,
            item_id: ItemId,
            payload: &'a Value,
            _slot_id: &'a SlotId,
            _position: PixelOffset,
        ) -> FactoryFuture<'a, Option<TraceItem>> {
            Box::pin(async move {
                if payload == &json!("unsupported") {
                    return None;
                }
                let trace = Rc::new(RefCell::new(Trace::default()));
                self.traces.borrow_mut().insert(item_id, trace.clone());
                Some(TraceItem { trace })
            })
        }

        fn remove_item(&self, item: TraceItem) {
            self.exited_before_dispose
                .borrow_mut()
                .push(item.trace.borrow().exited);
            let id = item
                .trace
                .borrow()
                .controls
                .map(|controls| controls.item_id);
            if let Some(id) = id {
                self.disposed.borrow_mut().push(id);
            }
        }
    }

    fn engine_with(
        config: SlotEngineConfig,
    ) -> (
        SlotEngine<Value, TraceFactory>,
        MemoryPrefsStore,
        MemoryNotificationService,
    ) {
        let prefs = MemoryPrefsStore::default();
        let notices = MemoryNotificationService::default();
        let engine = SlotEngine::new(
            config,
            HostServices::in_memory(prefs.clone(), notices.clone()),
        )
        .expect("valid config");
        (engine, prefs, notices)
    }

    #[test]
    fn add_without_factory_is_rejected() {
        let (mut engine, prefs, _) = engine_with(SlotEngineConfig::widgets());
        let result = block_on(engine.add_item(json!("clock")));
        assert_eq!(result, Err(SlotError::FactoryMissing));
        assert!(engine.items().is_empty());
        assert_eq!(prefs.raw("widgets"), None);
    }

    #[test]
    fn add_renders_mounts_attaches_controls_and_persists() {
        let (mut engine, prefs, _) = engine_with(SlotEngineConfig::widgets());
        let factory = TraceFactory::default();
        let traces = factory.traces.clone();
        block_on(engine.set_item_factory(factory));

        let record = block_on(engine.add_item(json!("clock"))).expect("add");
        assert_eq!(record.id, ItemId(1));
        assert_eq!(record.slot_id, SlotId::new("1"));

        let trace = traces.borrow()[&ItemId(1)].clone();
        assert_eq!(trace.borrow().slot, Some(SlotId::new("1")));
        assert_eq!(
            trace.borrow().controls,
            Some(ItemControls {
                item_id: ItemId(1),
                draggable: true,
                removable: true,
            })
        );
        assert_eq!(prefs.raw("widgets"), Some(engine.snapshot_json().unwrap()));
    }

    #[test]
    fn declined_payload_mutates_nothing() {
        let (mut engine, _, _) = engine_with(SlotEngineConfig::widgets());
        block_on(engine.set_item_factory(TraceFactory::default()));

        let result = block_on(engine.add_item(json!("unsupported")));
        assert!(matches!(result, Err(SlotError::FactoryDeclined { .. })));
        assert!(engine.items().is_empty());
        assert_eq!(engine.find_empty_slot(), Some(SlotId::new("1")));
    }

    #[test]
    fn full_grid_notifies_user() {
        let (mut engine, _, notices) =
            engine_with(SlotEngineConfig::widgets().with_slot_count(1));
        block_on(engine.set_item_factory(TraceFactory::default()));

        block_on(engine.add_item(json!("clock"))).expect("first add");
        let result = block_on(engine.add_item(json!("weather")));

        assert_eq!(result, Err(SlotError::NoEmptySlot));
        let delivered = notices.notices();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, NO_EMPTY_SLOT_TITLE);
    }

    #[test]
    fn add_to_occupied_slot_fails() {
        let (mut engine, _, _) = engine_with(SlotEngineConfig::shortcuts());
        block_on(engine.set_item_factory(TraceFactory::default()));
        block_on(engine.add_item_with_data(json!("a"), Some(SlotId::new("s2")))).expect("add");

        let again = block_on(engine.add_item_with_data(json!("b"), Some(SlotId::new("s2"))));
        assert_eq!(
            again,
            Err(SlotError::SlotOccupied {
                slot_id: SlotId::new("s2")
            })
        );
        let unknown = block_on(engine.add_item_with_data(json!("b"), Some(SlotId::new("2"))));
        assert!(matches!(unknown, Err(SlotError::UnknownSlot { .. })));
    }

    #[test]
    fn remove_disposes_item_and_is_idempotent() {
        let (mut engine, prefs, _) = engine_with(SlotEngineConfig::widgets());
        let factory = TraceFactory::default();
        let disposed = factory.disposed.clone();
        block_on(engine.set_item_factory(factory));
        let record = block_on(engine.add_item(json!("clock"))).expect("add");

        assert!(block_on(engine.remove_item(record.id)));
        assert!(!block_on(engine.remove_item(record.id)));
        assert_eq!(*disposed.borrow(), vec![record.id]);
        assert!(engine.items().is_empty());
        assert_eq!(prefs.raw("widgets").as_deref(), Some("[]"));
    }

    #[test]
    fn pointer_drag_moves_rendered_item_between_slots() {
        let (mut engine, _, _) = engine_with(SlotEngineConfig::widgets());
        let factory = TraceFactory::default();
        let traces = factory.traces.clone();
        block_on(engine.set_item_factory(factory));
        let record = block_on(engine.add_item(json!("clock"))).expect("add");

        block_on(engine.handle_pointer(PointerInput::Down {
            item_id: record.id,
            pointer: PointerPosition::new(0.0, 0.0),
            on_handle: true,
        }))
        .unwrap();
        block_on(engine.handle_pointer(PointerInput::Move {
            pointer: PointerPosition::new(60.0, 0.0),
        }))
        .unwrap();
        let trace = traces.borrow()[&record.id].clone();
        assert!(trace.borrow().dragging);
        assert_eq!(trace.borrow().offset, PixelOffset::new(60.0, 0.0));

        block_on(engine.handle_pointer(PointerInput::Up {
            pointer: PointerPosition::new(80.0, 0.0),
            target: Some(SlotId::new("4")),
        }))
        .unwrap();

        assert!(!trace.borrow().dragging);
        assert_eq!(trace.borrow().slot, Some(SlotId::new("4")));
        assert_eq!(trace.borrow().motions.last(), Some(&Motion::Settle));
        assert_eq!(engine.item(record.id).unwrap().slot_id, SlotId::new("4"));
        assert!(engine.item(record.id).unwrap().position.is_origin());
    }

    #[test]
    fn payload_update_rerenders_in_place() {
        let (mut engine, prefs, _) = engine_with(SlotEngineConfig::shortcuts());
        let factory = TraceFactory::default();
        let disposed = factory.disposed.clone();
        block_on(engine.set_item_factory(factory));
        let record = block_on(engine.add_item(json!({ "name": "Ex", "url": "https://example.com" })))
            .expect("add");

        let renamed = json!({ "name": "Example", "url": "https://example.com" });
        block_on(engine.update_item_payload(record.id, renamed.clone())).expect("update");

        assert_eq!(engine.item(record.id).unwrap().data, renamed);
        assert_eq!(engine.item(record.id).unwrap().slot_id, SlotId::new("s1"));
        assert_eq!(*disposed.borrow(), vec![record.id]);
        assert!(engine.rendered_item(record.id).is_some());
        assert!(prefs.raw("shortcuts").unwrap().contains("Example"));
    }

    #[test]
    fn restore_before_factory_defers_rendering() {
        let (mut engine, prefs, _) = engine_with(SlotEngineConfig::widgets());
        prefs.seed(
            "widgets",
            r#"[{"id":"3","data":"clock","slotId":"2","position":{"x":4.0,"y":5.0}}]"#,
        );

        let report = block_on(engine.restore());
        assert_eq!(report.restored, 1);
        assert_eq!(engine.pending_renders(), &[ItemId(3)]);
        assert!(engine.rendered_item(ItemId(3)).is_none());

        let factory = TraceFactory::default();
        let traces = factory.traces.clone();
        block_on(engine.set_item_factory(factory));

        assert!(engine.pending_renders().is_empty());
        let trace = traces.borrow()[&ItemId(3)].clone();
        assert_eq!(trace.borrow().slot, Some(SlotId::new("2")));
        assert_eq!(trace.borrow().offset, PixelOffset::new(4.0, 5.0));
        assert_eq!(trace.borrow().motions, vec![Motion::Instant]);
    }

    #[test]
    fn replacing_factory_rerenders_through_new_factory() {
        let (mut engine, _, _) = engine_with(SlotEngineConfig::widgets());
        let first = TraceFactory::default();
        let first_disposed = first.disposed.clone();
        block_on(engine.set_item_factory(first));
        let record = block_on(engine.add_item(json!("clock"))).expect("add");

        let second = TraceFactory::default();
        let second_traces = second.traces.clone();
        block_on(engine.set_item_factory(second));

        assert_eq!(*first_disposed.borrow(), vec![record.id]);
        let trace = second_traces.borrow()[&record.id].clone();
        assert_eq!(trace.borrow().slot, Some(SlotId::new("1")));
        assert!(trace.borrow().controls.is_some());
    }

    #[test]
    fn remove_plays_exit_transition_before_disposal() {
        let (mut engine, _, _) = engine_with(SlotEngineConfig::widgets());
        let factory = TraceFactory::default();
        let exited = factory.exited_before_dispose.clone();
        block_on(engine.set_item_factory(factory));
        let record = block_on(engine.add_item(json!("clock"))).expect("add");

        assert!(block_on(engine.remove_item(record.id)));
        assert_eq!(*exited.borrow(), vec![true]);
    }

    #[test]
    fn removing_dragged_item_abandons_gesture() {
        let (mut engine, _, _) = engine_with(SlotEngineConfig::widgets());
        block_on(engine.set_item_factory(TraceFactory::default()));
        let record = block_on(engine.add_item(json!("clock"))).expect("add");
        block_on(engine.handle_pointer(PointerInput::Down {
            item_id: record.id,
            pointer: PointerPosition::new(0.0, 0.0),
            on_handle: true,
        }))
        .unwrap();
        block_on(engine.handle_pointer(PointerInput::Move {
            pointer: PointerPosition::new(30.0, 0.0),
        }))
        .unwrap();

        assert!(block_on(engine.remove_item(record.id)));
        assert_eq!(engine.drag.active_item(), None);
        assert!(engine.interaction.dragging.is_none());
    }

    #[test]
    fn drag_released_over_own_slot_persists_new_offset() {
        let (mut engine, prefs, _) = engine_with(SlotEngineConfig::widgets());
        let factory = TraceFactory::default();
        let traces = factory.traces.clone();
        block_on(engine.set_item_factory(factory));
        let record = block_on(engine.add_item(json!("clock"))).expect("add");

        block_on(engine.handle_pointer(PointerInput::Down {
            item_id: record.id,
            pointer: PointerPosition::new(10.0, 10.0),
            on_handle: true,
        }))
        .unwrap();
        block_on(engine.handle_pointer(PointerInput::Move {
            pointer: PointerPosition::new(25.0, 18.0),
        }))
        .unwrap();
        block_on(engine.handle_pointer(PointerInput::Up {
            pointer: PointerPosition::new(25.0, 18.0),
            target: Some(SlotId::new("1")),
        }))
        .unwrap();

        let stored = engine.item(record.id).unwrap();
        assert_eq!(stored.slot_id, SlotId::new("1"));
        assert_eq!(stored.position, PixelOffset::new(15.0, 8.0));
        let trace = traces.borrow()[&record.id].clone();
        assert_eq!(trace.borrow().offset, PixelOffset::new(15.0, 8.0));
        assert!(!trace.borrow().dragging);

        let persisted: Value =
            serde_json::from_str(&prefs.raw("widgets").expect("blob")).expect("json");
        assert_eq!(persisted[0]["position"], json!({ "x": 15.0, "y": 8.0 }));
    }

    /// Store whose writes always fail.
    struct ReadOnlyPrefs;

    impl platform_host::PrefsStore for ReadOnlyPrefs {
        fn load_pref<'a>(
            &'a self,
            _key: &'a str,
        ) -> platform_host::PrefsStoreFuture<'a, Result<Option<String>, String>> {
            Box::pin(async { Ok(None) })
        }

        fn save_pref<'a>(
            &'a self,
            _key: &'a str,
            _raw_json: &'a str,
        ) -> platform_host::PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Err("quota exceeded".to_string()) })
        }
    }

    #[test]
    fn failed_write_is_swallowed_and_mutation_stands() {
        let host = HostServices::new(
            Rc::new(ReadOnlyPrefs),
            Rc::new(MemoryNotificationService::default()),
            platform_host::HostStrategy::Headless,
        );
        let mut engine =
            SlotEngine::<Value, TraceFactory>::new(SlotEngineConfig::widgets(), host)
                .expect("valid config");
        block_on(engine.set_item_factory(TraceFactory::default()));

        let record = block_on(engine.add_item(json!("clock"))).expect("add despite write failure");
        block_on(engine.move_item(record.id, SlotId::new("3"))).expect("move");

        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.item(record.id).unwrap().slot_id, SlotId::new("3"));
        assert!(block_on(engine.persist()).is_err());
    }
}
