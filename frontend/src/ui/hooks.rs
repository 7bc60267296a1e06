use std::cell::{Ref, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::ClientConfig;
use crate::controller::{Controller, Effect};

use super::AppContext;

#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().unwrap_or_else(|| {
        tracing::error!("page mounted outside <App>, using default configuration");
        AppContext::new(ClientConfig::default(), Callback::noop())
    })
}

/// Runs a page controller's effects against the browser.
struct Runner<C: Controller> {
    state: Rc<RefCell<C>>,
    app: AppContext,
    redraw: UseForceUpdateHandle,
}

impl<C: Controller> Clone for Runner<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            app: self.app.clone(),
            redraw: self.redraw.clone(),
        }
    }
}

impl<C: Controller> Runner<C> {
    fn dispatch(&self, action: C::Action) {
        let effects = self.state.borrow_mut().update(action);
        self.redraw.force_update();
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect<C::Request>) {
        match effect {
            Effect::Request(request) => {
                let runner = self.clone();
                spawn_local(async move {
                    let action = C::perform(&*runner.app.env, request).await;
                    runner.dispatch(action);
                });
            }
            Effect::ExpireToast { id, after_ms } => {
                let runner = self.clone();
                spawn_local(async move {
                    TimeoutFuture::new(after_ms).await;
                    runner.dispatch(C::toast_expired(id));
                });
            }
            Effect::Navigate { to, after_ms: 0 } => self.app.navigate.emit(to),
            Effect::Navigate { to, after_ms } => {
                let navigate = self.app.navigate.clone();
                spawn_local(async move {
                    TimeoutFuture::new(after_ms).await;
                    navigate.emit(to);
                });
            }
        }
    }
}

pub struct UseController<C: Controller> {
    runner: Runner<C>,
}

impl<C: Controller> UseController<C> {
    pub fn state(&self) -> Ref<'_, C> {
        self.runner.state.borrow()
    }

    pub fn callback<E: 'static>(&self, to_action: impl Fn(E) -> C::Action + 'static) -> Callback<E> {
        let runner = self.runner.clone();
        Callback::from(move |event| runner.dispatch(to_action(event)))
    }

    /// Like `callback`, for events that only sometimes mean something.
    pub fn filter_callback<E: 'static>(
        &self,
        to_action: impl Fn(E) -> Option<C::Action> + 'static,
    ) -> Callback<E> {
        let runner = self.runner.clone();
        Callback::from(move |event| {
            if let Some(action) = to_action(event) {
                runner.dispatch(action);
            }
        })
    }
}

/// Mounts a controller for the lifetime of the component and fires its
/// start action once.
#[hook]
pub fn use_controller<C, F>(init: F) -> UseController<C>
where
    C: Controller,
    F: FnOnce(&ClientConfig) -> C,
{
    let app = use_app();
    let state = {
        let config = app.config.clone();
        use_mut_ref(move || init(&config))
    };
    let redraw = use_force_update();
    let runner = Runner { state, app, redraw };

    {
        let runner = runner.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(action) = C::start() {
                    runner.dispatch(action);
                }
                || ()
            },
            (),
        );
    }

    UseController { runner }
}
