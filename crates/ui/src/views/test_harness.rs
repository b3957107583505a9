use std::sync::Arc;

use checklist_core::model::{Catalog, ProgressState};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::ProgressService;
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::ChecklistView;
use crate::vm::ChecklistIntent;

use super::checklist::ChecklistTestHandles;

struct TestApp {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    initial: ProgressState,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn progress_service(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn initial_progress(&self) -> ProgressState {
        self.initial.clone()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: ChecklistTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { ChecklistView {} }
}

pub struct ChecklistHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub progress: Arc<ProgressService>,
    handles: ChecklistTestHandles,
}

impl ChecklistHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Send an intent through the registered view callback and re-render.
    pub fn dispatch(&mut self, intent: ChecklistIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Give the persistence coroutine a chance to run.
    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over in-memory storage, seeded the way the app seeds it at launch.
pub async fn setup_checklist_harness(storage: Storage) -> ChecklistHarness {
    let catalog = Arc::new(Catalog::bundled().expect("bundled catalog"));
    let progress = Arc::new(ProgressService::new(Arc::clone(&storage.blobs)));
    let initial = progress.load().await;
    let handles = ChecklistTestHandles::default();

    let app = Arc::new(TestApp {
        catalog,
        progress: Arc::clone(&progress),
        initial,
    });

    let dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ChecklistHarness {
        dom,
        storage,
        progress,
        handles,
    }
}
