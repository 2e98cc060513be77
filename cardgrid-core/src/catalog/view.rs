//! The catalog view synchronizer.
//!
//! [`Catalog`] owns the whole session: the record store, the facet options,
//! the view state and the sink. State lives in a signal; the filtered result
//! is a memo over the store and the filter half of the state; one effect
//! turns both into a frame. Dispatching an action applies the pure reducer
//! and writes the signal once, which re-renders exactly once before
//! `dispatch` returns.
//!
//! Because the filter memo compares values, paging re-renders without
//! re-running the filter.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::{CatalogError, Result};
use crate::loader::{DataSource, ParseOptions};
use crate::reactive::{Effect, Memo, Signal};
use crate::render::{DisplaySink, Frame};

use super::facets::{extract_facets, FacetValues};
use super::filter::{matching_indices, FilterState};
use super::paginate::{total_pages, DEFAULT_PAGE_SIZE};
use super::record::{Facet, Record};
use super::state::{Action, Phase, ViewState};
use super::store::RecordStore;

type SharedSink = Arc<Mutex<Box<dyn DisplaySink>>>;

/// A loaded (or loading) catalog bound to a display sink.
pub struct Catalog {
    page_size: usize,
    store: Signal<RecordStore>,
    facets: Signal<Arc<FacetValues>>,
    state: Signal<ViewState>,
    filter: Memo<FilterState>,
    matches: Memo<Arc<[usize]>>,
    phase: RwLock<Phase>,
    sink: SharedSink,
    render: Mutex<Option<Effect>>,
}

impl Catalog {
    /// Create an empty catalog rendering to `sink`.
    ///
    /// Nothing is rendered until records are loaded.
    pub fn new(page_size: usize, sink: impl DisplaySink + 'static) -> Self {
        let store = Signal::new(RecordStore::default());
        let state = Signal::new(ViewState::default());

        let filter = {
            let state = state.clone();
            Memo::new(move || state.with(|s| s.filter.clone()))
        };

        let matches = {
            let store = store.clone();
            let filter = filter.clone();
            Memo::new(move || {
                let filter = filter.get();
                store.with(|records| Arc::<[usize]>::from(matching_indices(records, &filter)))
            })
        };

        Self {
            page_size: page_size.max(1),
            store,
            facets: Signal::new(Arc::new(FacetValues::default())),
            state,
            filter,
            matches,
            phase: RwLock::new(Phase::Idle),
            sink: Arc::new(Mutex::new(Box::new(sink))),
            render: Mutex::new(None),
        }
    }

    /// A catalog with the default page size.
    pub fn with_sink(sink: impl DisplaySink + 'static) -> Self {
        Self::new(DEFAULT_PAGE_SIZE, sink)
    }

    /// Fetch, parse and populate.
    ///
    /// A failure is logged and leaves the catalog in [`Phase::Failed`] with an
    /// empty view; later actions are ignored. Only the first call proceeds;
    /// any other, including one overlapping it, gets
    /// [`CatalogError::AlreadyLoaded`].
    pub async fn load(&self, source: &DataSource, options: &ParseOptions) -> Result<()> {
        self.advance(Phase::Loading)?;
        match RecordStore::load(source, options).await {
            Ok(store) => {
                self.install(store);
                Ok(())
            }
            Err(err) => {
                error!(%source, error = %err, "failed to load dataset");
                self.fail();
                Err(err.into())
            }
        }
    }

    /// Install already-parsed records, extract facets and render the first
    /// frame.
    pub fn populate(&self, store: impl Into<RecordStore>) -> Result<()> {
        self.advance(Phase::Ready)?;
        self.install(store.into());
        Ok(())
    }

    /// Leave [`Phase::Idle`] for `next`, or fail if something already did.
    fn advance(&self, next: Phase) -> Result<()> {
        let mut phase = self.phase.write();
        if *phase != Phase::Idle {
            return Err(CatalogError::AlreadyLoaded);
        }
        *phase = next;
        Ok(())
    }

    fn install(&self, store: RecordStore) {
        *self.phase.write() = Phase::Ready;

        let facets = extract_facets(&store);
        info!(
            records = store.len(),
            types = facets.values(Facet::Type).len(),
            colors = facets.values(Facet::Color).len(),
            factions = facets.values(Facet::Faction).len(),
            "catalog ready"
        );
        self.facets.set(Arc::new(facets));
        self.store.set(store);
        self.start_rendering();
    }

    fn start_rendering(&self) {
        let store = self.store.clone();
        let state = self.state.clone();
        let matches = self.matches.clone();
        let sink = Arc::clone(&self.sink);
        let page_size = self.page_size;

        let effect = Effect::new(move || {
            let matches = matches.get();
            let records = store.get();
            let page = state.with(|s| s.page);
            let frame = Frame::compose(&records, &matches, page, page_size);

            debug!(summary = %frame.range, page = frame.controls.page, "rendering");
            if let Err(err) = frame.present(&mut **sink.lock()) {
                warn!(error = %err, "display sink failed");
            }
        });
        *self.render.lock() = Some(effect);
    }

    fn fail(&self) {
        *self.phase.write() = Phase::Failed;
        if let Err(err) = Frame::empty(self.page_size).present(&mut **self.sink.lock()) {
            warn!(error = %err, "display sink failed");
        }
    }

    /// Apply a user action.
    ///
    /// Returns `false` when nothing happened: the catalog failed to load, or
    /// the action was navigation past the first or last page.
    pub fn dispatch(&self, action: Action) -> bool {
        if self.phase() == Phase::Failed {
            debug!(?action, "catalog failed to load, ignoring action");
            return false;
        }

        let pages = self.total_pages();
        let next = self.state.with(|state| state.reduce(&action, pages));
        match next {
            Some(next) => {
                debug!(?action, page = next.page, "applying action");
                self.state.set(next);
                true
            }
            None => {
                debug!(?action, "action not available");
                false
            }
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.read()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> ViewState {
        self.state.get_untracked()
    }

    pub fn filter(&self) -> FilterState {
        self.filter.get()
    }

    /// Facet options, extracted once at load.
    pub fn facets(&self) -> Arc<FacetValues> {
        self.facets.get_untracked()
    }

    pub fn records(&self) -> RecordStore {
        self.store.get_untracked()
    }

    /// Records matching the current filter, in dataset order.
    pub fn filtered(&self) -> Vec<Record> {
        let store = self.store.get_untracked();
        self.matches
            .get()
            .iter()
            .filter_map(|&index| store.get(index).cloned())
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.matches.with(|m| m.len())
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.page_size)
    }

    /// The frame the current state renders to, computed without rendering.
    pub fn frame(&self) -> Frame {
        let matches = self.matches.get();
        let store = self.store.get_untracked();
        Frame::compose(&store, &matches, self.state.get_untracked().page, self.page_size)
    }

    /// Number of render passes so far.
    pub fn render_count(&self) -> usize {
        self.render
            .lock()
            .as_ref()
            .map(Effect::run_count)
            .unwrap_or(0)
    }

    /// How many times the filter itself has run.
    pub fn filter_runs(&self) -> usize {
        self.matches.computations()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("phase", &self.phase())
            .field("page_size", &self.page_size)
            .field("records", &self.store.get_untracked().len())
            .field("state", &self.state.get_untracked())
            .finish()
    }
}
