//! Post Form Component
//!
//! Create a new item or edit an existing one. The submit button is latched
//! while a request is in flight; entered values survive a failed submit.

use std::sync::Arc;

use leptos::prelude::*;

use learnhub_core::form::DraftForm;
use learnhub_core::{FeatureKind, Item};

use crate::commands::use_feed;
use crate::context::use_app_context;
use crate::display::capitalize;

#[component]
pub fn PostForm(
    kind: FeatureKind,
    /// Item being edited; `None` creates a new one
    #[prop(optional)]
    editing: Option<Arc<Item>>,
    /// Called after a successful save or on cancel
    #[prop(optional, into)]
    on_done: Option<Callback<()>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let feed = use_feed();

    let initial = match &editing {
        Some(item) => DraftForm::from_item(kind, item),
        None => DraftForm::new(kind),
    };
    let form = RwSignal::new(initial);
    let edit_id = editing.as_ref().map(|item| item.id.clone());
    let is_edit = edit_id.is_some();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.latch.try_begin()).unwrap_or(false) {
            return;
        }
        let draft = form.with_untracked(|f| f.to_draft());
        let edit_id = edit_id.clone();
        let success = if is_edit {
            format!("{} updated", capitalize(kind.noun()))
        } else {
            format!("{} published", capitalize(kind.noun()))
        };

        feed.run(
            ctx,
            Some(success),
            move |reconciler, session| async move {
                match edit_id {
                    Some(id) => reconciler.update(session.as_ref(), &id, &draft).await,
                    None => reconciler.create(session.as_ref(), &draft).await,
                }
            },
            move |ok| {
                form.update(|f| {
                    f.latch.finish();
                    if ok && !is_edit {
                        f.reset();
                    }
                });
                if ok {
                    if let Some(on_done) = on_done {
                        on_done.run(());
                    }
                }
            },
        );
    };

    view! {
        <form class={if is_edit { "post-form editing" } else { "post-form" }} on:submit=submit>
            <input
                type="text"
                placeholder="Title"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
            />
            <textarea
                placeholder=format!("What's this {} about?", kind.noun())
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
            ></textarea>

            <div class="extra-fields">
                {kind
                    .extra_fields()
                    .iter()
                    .map(|(name, label)| {
                        let name: &'static str = *name;
                        view! {
                            <label class="field">
                                <span>{*label}</span>
                                <input
                                    type="text"
                                    prop:value=move || form.with(|f| f.field(name).to_string())
                                    on:input=move |ev| form.update(|f| f.set_field(name, event_target_value(&ev)))
                                />
                            </label>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="form-actions">
                <button type="submit" disabled=move || form.with(|f| f.latch.is_submitting())>
                    {move || match (is_edit, form.with(|f| f.latch.is_submitting())) {
                        (_, true) => "Saving...",
                        (true, false) => "Save",
                        (false, false) => "Publish",
                    }}
                </button>
                {is_edit.then(|| view! {
                    <button
                        type="button"
                        class="cancel-btn"
                        on:click=move |_| {
                            if let Some(on_done) = on_done {
                                on_done.run(());
                            }
                        }
                    >
                        "Cancel"
                    </button>
                })}
            </div>
        </form>
    }
}
