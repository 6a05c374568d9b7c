//! User profile page with owner-only edit and delete.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::{UnboundedSender, unbounded};
use gloo::console;
use gloo::dialogs::confirm;
use gloo::file::File;
use gloo::file::callbacks::{FileReader, read_as_bytes};
use userhub_client::models::User;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, follow_redirect};
use crate::components::app_input::{AppInput, edit_callback, notifier};
use crate::components::feedback::{Alert, Spinner};
use crate::core::request::RequestState;
use crate::features::user::delete::{self, DeleteAction};
use crate::features::user::edit::{self, EditController, EditField};
use crate::features::user::image::encode_data_url;
use crate::features::user::{ProfileMode, follow_profiles, owner_actions_visible};

type Profile = Rc<RefCell<RequestState<User>>>;

#[derive(Properties, PartialEq)]
pub(crate) struct UserPageProps {
    pub(crate) id: String,
}

#[function_component(UserPage)]
pub(crate) fn user_page(props: &UserPageProps) -> Html {
    let profile = use_mut_ref(RequestState::<User>::default);
    let ids = use_mut_ref(|| None::<UnboundedSender<String>>);
    let mode = use_mut_ref(ProfileMode::default);
    let deletion = use_mut_ref(DeleteAction::default);
    let reader = use_mut_ref(|| None::<FileReader>);
    let update = use_force_update();
    let navigator = use_navigator();
    let ctx = use_context::<AppCtx>();
    {
        let profile = profile.clone();
        let mode = mode.clone();
        let deletion = deletion.clone();
        let notify = notifier(&update);
        let client = ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |id: &String| {
                mode.borrow_mut().stop_editing();
                deletion.borrow_mut().reset();
                if let Some(client) = client {
                    let mut ids = ids.borrow_mut();
                    let sender = ids.get_or_insert_with(|| {
                        let (sender, receiver) = unbounded();
                        spawn_local(async move {
                            follow_profiles(receiver, &client, |state| {
                                *profile.borrow_mut() = state.clone();
                                notify();
                            })
                            .await;
                        });
                        sender
                    });
                    if let Err(err) = sender.unbounded_send(id.clone()) {
                        console::error!("profile loader stopped", err.to_string());
                    }
                }
                || ()
            },
            props.id.clone(),
        );
    }
    let Some(ctx) = ctx else {
        return html! {};
    };

    let state = profile.borrow().clone();
    let user = match state {
        RequestState::Idle => return html! {},
        RequestState::Loading => return html! { <Spinner /> },
        RequestState::Fail(error) => return html! { <Alert message={error.resolve(&ctx.bundle)} /> },
        RequestState::Success(user) => user,
    };

    let image_src = mode.borrow().image_src(&user);
    let editor = mode.borrow().editor();
    let body = if let Some(editor) = editor {
        edit_form(&ctx, &editor, &profile, &mode, &reader, &update)
    } else {
        let actions = owner_actions_visible(&ctx.auth.borrow(), &props.id).then(|| {
            owner_actions(&ctx, &user, &mode, &deletion, &update, navigator.clone())
        });
        html! {
            <>
                <h3>{ user.username.clone() }</h3>
                { for actions }
            </>
        }
    };

    html! {
        <div class="card text-center">
            <div class="card-header">
                <img
                    class="rounded-circle shadow-sm"
                    width="200"
                    height="200"
                    src={image_src}
                    alt={format!("{} profile", user.username)}
                />
            </div>
            <div class="card-body">{ body }</div>
        </div>
    }
}

fn owner_actions(
    ctx: &AppCtx,
    user: &User,
    mode: &Rc<RefCell<ProfileMode>>,
    deletion: &Rc<RefCell<DeleteAction>>,
    update: &UseForceUpdateHandle,
    navigator: Option<Navigator>,
) -> Html {
    let on_edit = {
        let mode = mode.clone();
        let user = user.clone();
        let update = update.clone();
        Callback::from(move |_: MouseEvent| {
            mode.borrow_mut().start_edit(&user);
            update.force_update();
        })
    };
    let on_delete = {
        let ctx = ctx.clone();
        let deletion = deletion.clone();
        let update = update.clone();
        let id = user.id;
        Callback::from(move |_: MouseEvent| {
            if deletion.borrow().is_busy() {
                return;
            }
            let confirmed = confirm(&ctx.t("confirmDelete", "Are you sure?"));
            let Some(controller) = deletion.borrow_mut().prepare(id) else {
                return;
            };
            let notify = notifier(&update);
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                if !delete::submit(&controller, &ctx.client, confirmed, notify).await {
                    return;
                }
                let redirect = delete::complete(&controller.borrow(), &mut ctx.auth.borrow_mut());
                if redirect.is_some() {
                    ctx.on_auth_change.emit(());
                }
                follow_redirect(navigator.as_ref(), redirect);
            });
        })
    };

    let deletion = deletion.borrow();
    let deleting = deletion.is_busy();
    let delete_error = deletion
        .controller()
        .and_then(|controller| controller.borrow().generic_error().cloned());

    html! {
        <>
            <button class="btn btn-outline-success me-2" onclick={on_edit}>{ ctx.t("edit", "Edit") }</button>
            <button class="btn btn-danger" disabled={deleting} onclick={on_delete}>
                if deleting {
                    <Spinner />
                }
                { ctx.t("delete", "Delete") }
            </button>
            if let Some(error) = delete_error {
                <Alert message={error.resolve(&ctx.bundle)} />
            }
        </>
    }
}

fn edit_form(
    ctx: &AppCtx,
    editor: &Rc<RefCell<EditController>>,
    profile: &Profile,
    mode: &Rc<RefCell<ProfileMode>>,
    reader: &Rc<RefCell<Option<FileReader>>>,
    update: &UseForceUpdateHandle,
) -> Html {
    let on_save = {
        let ctx = ctx.clone();
        let editor = editor.clone();
        let profile = profile.clone();
        let mode = mode.clone();
        let update = update.clone();
        Callback::from(move |_: MouseEvent| {
            let ctx = ctx.clone();
            let editor = editor.clone();
            let profile = profile.clone();
            let mode = mode.clone();
            let update = update.clone();
            spawn_local(async move {
                edit::submit(&editor, &ctx.client, notifier(&update)).await;
                let applied = profile.borrow_mut().data_mut().is_some_and(|user| {
                    edit::complete(&editor.borrow(), user, &mut ctx.auth.borrow_mut())
                });
                if applied {
                    mode.borrow_mut().stop_editing();
                    ctx.on_auth_change.emit(());
                    update.force_update();
                }
            });
        })
    };
    let on_cancel = {
        let mode = mode.clone();
        let update = update.clone();
        Callback::from(move |_: MouseEvent| {
            mode.borrow_mut().stop_editing();
            update.force_update();
        })
    };
    let on_image = {
        let editor = editor.clone();
        let reader = reader.clone();
        let update = update.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let file = File::from(file);
            let mime = file.raw_mime_type();
            let editor = editor.clone();
            let update = update.clone();
            let task = read_as_bytes(&file, move |bytes| match bytes {
                Ok(bytes) => {
                    editor
                        .borrow_mut()
                        .edit(EditField::Image, encode_data_url(&mime, &bytes));
                    update.force_update();
                }
                Err(err) => {
                    gloo::console::error!("failed to read image", err.to_string());
                }
            });
            *reader.borrow_mut() = Some(task);
        })
    };

    let form = editor.borrow();
    html! {
        <>
            <AppInput
                id="username"
                label={ctx.t("username", "Username")}
                value={form.fields().username.clone()}
                error={form.field_error(EditField::Username).map(ToString::to_string)}
                oninput={edit_callback(editor, update, EditField::Username)}
            />
            <div class="mb-3">
                <label for="file-upload" class="form-label">{ ctx.t("selectImage", "Select Image") }</label>
                <input id="file-upload" class="form-control" type="file" onchange={on_image} />
                if let Some(error) = form.field_error(EditField::Image) {
                    <div class="text-danger">{ error.to_string() }</div>
                }
            </div>
            if let Some(error) = form.generic_error() {
                <Alert message={error.resolve(&ctx.bundle)} />
            }
            <button class="btn btn-primary me-2" disabled={!form.can_submit()} onclick={on_save}>
                if form.is_loading() {
                    <Spinner />
                }
                { ctx.t("save", "Save") }
            </button>
            <button class="btn btn-outline-secondary" onclick={on_cancel}>{ ctx.t("cancel", "Cancel") }</button>
        </>
    }
}
