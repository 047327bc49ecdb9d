use common::route::Route;
use yew::prelude::*;

const NAVIGATION: [(&str, &str, Route); 6] = [
    ("dashboard", "Dashboard", Route::Dashboard),
    ("library_books", "Templates", Route::Templates),
    ("group", "Clients", Route::Clients),
    ("description", "Documents", Route::Documents),
    ("settings", "Settings", Route::Settings),
    ("verified_user", "Expert-Comptable", Route::Accountant),
];

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current: Route,
    pub navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

pub struct Sidebar;

impl Component for Sidebar {
    type Message = ();
    type Properties = SidebarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Sidebar
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_logout = props.on_logout.reform(|_: MouseEvent| ());

        html! {
            <nav class="sidebar">
                <div class="brand">
                    <i class="material-icons">{"bolt"}</i>
                    <span>{"FactureZen"}</span>
                </div>
                {
                    for NAVIGATION.iter().map(|(icon, label, route)| {
                        let route = *route;
                        let active = props.current == route;
                        html! {
                            <button
                                class={classes!("nav-item", active.then_some("active"))}
                                onclick={props.navigate.reform(move |_: MouseEvent| route)}
                            >
                                <i class="material-icons">{ *icon }</i>
                                <span>{ *label }</span>
                            </button>
                        }
                    })
                }
                <button class="nav-item logout" onclick={on_logout}>
                    <i class="material-icons">{"logout"}</i>
                    <span>{"Logout"}</span>
                </button>
            </nav>
        }
    }
}
