mod auth;
mod dashboard;
mod hooks;
mod register;
mod users;
mod widgets;

use std::rc::Rc;

use yew::prelude::*;

use crate::api::HttpApi;
use crate::config::ClientConfig;
use crate::controller::{Env, Route};
use crate::storage::{BrowserSession, SessionStore};

use self::auth::{LoginScreen, SignUpScreen};
use self::dashboard::DashboardScreen;
use self::register::RegisterUserScreen;
use self::users::UsersScreen;
use self::widgets::{icon_credit_card, icon_menu, icon_user_plus, icon_users, icon_x};

pub type AppEnv = Env<HttpApi, BrowserSession>;

/// Shared by every page: configuration, backend access and page switching.
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<ClientConfig>,
    pub env: Rc<AppEnv>,
    pub navigate: Callback<Route>,
}

impl AppContext {
    pub fn new(config: ClientConfig, navigate: Callback<Route>) -> Self {
        let env = Env {
            api: HttpApi::new(&config),
            session: BrowserSession,
        };
        Self {
            config: Rc::new(config),
            env: Rc::new(env),
            navigate,
        }
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && Rc::ptr_eq(&self.env, &other.env) && self.navigate == other.navigate
    }
}

fn initial_route(session: &impl SessionStore) -> Route {
    if session.load().is_some() {
        Route::Users
    } else {
        Route::Login
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let route = use_state(|| initial_route(&BrowserSession));
    let context = {
        let route = route.clone();
        use_memo(
            move |_| {
                let config = ClientConfig::load();
                tracing::info!(api = %config.api_base_url, "client configured");
                let navigate = Callback::from(move |to: Route| {
                    tracing::debug!(?to, "navigating");
                    route.set(to);
                });
                AppContext::new(config, navigate)
            },
            (),
        )
    };

    let content = match *route {
        Route::Login => html! { <LoginScreen /> },
        Route::SignUp => html! { <SignUpScreen /> },
        Route::RegisterUser => html! { <RegisterUserScreen /> },
        Route::Users => html! { <UsersScreen /> },
        Route::Dashboard => html! { <DashboardScreen /> },
    };

    let body = match *route {
        Route::Login | Route::SignUp => content,
        active => html! {
            <Layout active={active} on_select={context.navigate.clone()}>
                { content }
            </Layout>
        },
    };

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            { body }
        </ContextProvider<AppContext>>
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active: Route,
    on_select: Callback<Route>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active={props.active} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header active={props.active} on_select={props.on_select.clone()} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    route: Route,
    icon: fn() -> Html,
}

const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "User Management",
        route: Route::Users,
        icon: icon_users,
    },
    NavItem {
        label: "Register User",
        route: Route::RegisterUser,
        icon: icon_user_plus,
    },
    NavItem {
        label: "My Expenses",
        route: Route::Dashboard,
        icon: icon_credit_card,
    },
];

fn nav_links(active: Route, on_select: &Callback<Route>) -> Html {
    NAV_ITEMS
        .iter()
        .map(|item| {
            let class_name = if item.route == active {
                "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
            } else {
                "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
            };
            let on_select = on_select.clone();
            let route = item.route;

            html! {
                <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(route))}>
                    <span class="shrink-0">{ (item.icon)() }</span>
                    <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                </button>
            }
        })
        .collect()
}

#[derive(Properties, PartialEq)]
struct NavProps {
    active: Route,
    on_select: Callback<Route>,
}

#[function_component(Sidebar)]
fn sidebar(props: &NavProps) -> Html {
    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-2xl">
                    {"💰"}
                </div>
                <span class="text-[#173E63] text-xl font-black tracking-tight">{"Expense Tracker"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { nav_links(props.active, &props.on_select) }
                </nav>
            </div>
        </div>
    }
}

/// Top bar. On small screens it carries a menu toggle that closes again
/// once a page is picked.
#[function_component(Header)]
fn header(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };
    let on_select = {
        let menu_open = menu_open.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |route: Route| {
            menu_open.set(false);
            on_select.emit(route);
        })
    };

    html! {
        <header class="relative bg-card border-b border-border px-6 py-4 flex items-center justify-between">
            <span class="text-sm font-semibold text-muted-foreground">{ props.active.title() }</span>
            <button type="button" class="md:hidden p-2 rounded-lg hover:bg-secondary" onclick={toggle_menu}>
                { if *menu_open { icon_x() } else { icon_menu() } }
            </button>
            if *menu_open {
                <nav class="md:hidden absolute top-full right-4 mt-2 w-60 bg-[#173E63] rounded-xl p-3 space-y-1 shadow-lg z-40">
                    { nav_links(props.active, &on_select) }
                </nav>
            }
        </header>
    }
}
