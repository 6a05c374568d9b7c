//! Paginated user list on the home page.
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::components::app_input::notifier;
use crate::components::feedback::{Alert, Spinner};
use crate::core::pager::DEFAULT_PAGE_SIZE;
use crate::core::request::RequestState;
use crate::features::user::image::profile_image_src;
use crate::features::user_list::{self, PageNav, UserPager};

const PAGE_SIZES: [u32; 3] = [DEFAULT_PAGE_SIZE, 5, 10];

#[function_component(UserList)]
pub(crate) fn user_list() -> Html {
    let pager = use_mut_ref(UserPager::default);
    let update = use_force_update();
    let ctx = use_context::<AppCtx>();

    let navigate = {
        let pager = pager.clone();
        let update = update.clone();
        let client = ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |nav: PageNav| {
            let Some(client) = client.clone() else {
                return;
            };
            let pager = pager.clone();
            let notify = notifier(&update);
            spawn_local(async move {
                user_list::load(&pager, &client, nav, notify).await;
            });
        })
    };
    {
        let navigate = navigate.clone();
        use_effect_with_deps(
            move |()| {
                navigate.emit(PageNav::First);
                || ()
            },
            (),
        );
    }
    let Some(ctx) = ctx else {
        return html! {};
    };

    let pager = pager.borrow();
    let list = match pager.state() {
        RequestState::Idle => html! {},
        RequestState::Loading => html! { <li class="list-group-item text-center"><Spinner /></li> },
        RequestState::Fail(error) => html! { <Alert message={error.resolve(&ctx.bundle)} /> },
        RequestState::Success(page) => html! {
            <>
            { for page.content.iter().map(|user| html! {
                <li class="list-group-item list-group-item-action">
                    <Link<Route> to={Route::User { id: user.id.to_string() }}>
                        <img
                            class="rounded-circle shadow-sm me-2"
                            width="30"
                            height="30"
                            src={profile_image_src(None, user.image.as_deref())}
                            alt={format!("{} profile", user.username)}
                        />
                        { user.username.clone() }
                    </Link<Route>>
                </li>
            }) }
            </>
        },
    };

    let on_size = {
        let navigate = navigate.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Ok(size) = select.value().parse::<u32>() {
                navigate.emit(PageNav::Resize(size));
            }
        })
    };
    let on_previous = {
        let navigate = navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(PageNav::Previous))
    };
    let on_next = Callback::from(move |_: MouseEvent| navigate.emit(PageNav::Next));
    let size = pager.query().size;

    html! {
        <div class="card">
            <div class="card-header text-center">
                <h3>{ ctx.t("userList", "User List") }</h3>
            </div>
            <ul class="list-group list-group-flush">{ list }</ul>
            <div class="card-footer d-flex justify-content-between align-items-center">
                if pager.has_previous() {
                    <button class="btn btn-outline-secondary btn-sm" onclick={on_previous}>
                        { ctx.t("previous", "< previous") }
                    </button>
                } else {
                    <span></span>
                }
                <select class="form-select form-select-sm w-auto" onchange={on_size}>
                    { for PAGE_SIZES.iter().map(|option| html! {
                        <option value={option.to_string()} selected={*option == size}>{ option.to_string() }</option>
                    }) }
                </select>
                if pager.has_next() {
                    <button class="btn btn-outline-secondary btn-sm" onclick={on_next}>
                        { ctx.t("next", "next >") }
                    </button>
                } else {
                    <span></span>
                }
            </div>
        </div>
    }
}
