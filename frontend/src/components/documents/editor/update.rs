//! Update function for the document editor page.
//!
//! Follows the Elm-style split: `update` mutates the page state for one
//! message, spawns whatever request the message implies, and returns whether
//! the view should re-render. Request completions come back as messages.
//!
//! Generation is asynchronous on the server. After the POST is accepted the
//! page polls the document (see `common::jobs`) until it leaves `DRAFT` or
//! the watch gives up.

use common::api::endpoints;
use common::editor::DocumentEditor;
use common::jobs::{GenerationWatch, JobStatus};
use common::model::client::Client;
use common::model::document::{preview_file_name, Document, DownloadFormat};
use common::model::template::Template;
use common::route::Route;
use futures_util::future::try_join;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::{report_error, save_file, show_error, show_success, show_toast};

use super::fetch_document;
use super::messages::Msg;
use super::state::DocumentEditorPage;

pub fn update(page: &mut DocumentEditorPage, ctx: &Context<DocumentEditorPage>, msg: Msg) -> bool {
    let api = ctx.props().api.clone();
    let link = ctx.link().clone();

    match msg {
        Msg::Loaded(document, versions) => {
            let (template_id, client_id) = (document.template_id, document.client_id);
            page.editor = Some(DocumentEditor::new(document, versions));
            page.loading = false;
            spawn_local(async move {
                let related = try_join(
                    api.get::<Template>(endpoints::template(template_id)),
                    api.get::<Client>(endpoints::client(client_id)),
                )
                .await;
                match related {
                    Ok((template, client)) => link.send_message(Msg::RelatedLoaded(template, client)),
                    Err(err) => link.send_message(Msg::RelatedFailed(err)),
                }
            });
            true
        }
        Msg::RelatedLoaded(template, client) => {
            if let Some(editor) = page.editor.as_mut() {
                editor.set_template(template);
                editor.set_client(client);
            }
            true
        }
        Msg::RelatedFailed(err) => {
            if let Some(editor) = page.editor.as_mut() {
                editor.mark_related_failed();
            }
            report_error(&err);
            true
        }
        Msg::LoadFailed(err) => {
            page.loading = false;
            page.load_failed = true;
            report_error(&err);
            true
        }
        Msg::SetField(key, raw) => {
            if let Some(editor) = page.editor.as_mut() {
                editor.set_field(&key, raw);
            }
            true
        }

        Msg::Save => {
            let Some(editor) = page.editor.as_mut() else {
                return false;
            };
            let id = editor.document().id;
            match editor.begin_save() {
                Ok(body) => {
                    spawn_local(async move {
                        match api.patch::<_, Value>(endpoints::document(id), &body).await {
                            Ok(saved) => {
                                let saved = serde_json::from_value::<Document>(saved).ok();
                                link.send_message(Msg::Saved(saved));
                            }
                            Err(err) => link.send_message(Msg::SaveFailed(err)),
                        }
                    });
                }
                Err(err) => show_error(&err.to_string()),
            }
            true
        }
        Msg::Saved(saved) => {
            if let Some(editor) = page.editor.as_mut() {
                editor.save_succeeded(saved);
            }
            show_success("Draft saved");
            true
        }
        Msg::SaveFailed(err) => {
            if let Some(editor) = page.editor.as_mut() {
                editor.save_failed();
            }
            report_error(&err);
            true
        }

        Msg::Generate => {
            let Some(editor) = page.editor.as_mut() else {
                return false;
            };
            let id = editor.document().id;
            match editor.begin_generate() {
                Ok(()) => {
                    spawn_local(async move {
                        match api.post::<_, Value>(endpoints::generate_document(id), &serde_json::json!({})).await {
                            Ok(_) => link.send_message(Msg::GenerateQueued),
                            Err(err) => link.send_message(Msg::GenerateFailed(err)),
                        }
                    });
                }
                Err(err) => show_error(&err.to_string()),
            }
            true
        }
        Msg::GenerateQueued => {
            show_toast("Generation started...");
            page.watch = GenerationWatch::default();
            ctx.link().send_message(Msg::Poll);
            false
        }
        Msg::GenerateFailed(err) => {
            if let Some(editor) = page.editor.as_mut() {
                editor.generation_stopped();
            }
            report_error(&err);
            true
        }
        Msg::Poll => {
            let delay = page.watch.next_delay_ms();
            let id = ctx.props().document_id;
            spawn_local(async move {
                TimeoutFuture::new(delay).await;
                let read = fetch_document(&api, id).await;
                if let Err(err) = &read {
                    gloo_console::warn!(format!("Polling document {id} failed: {err}"));
                }
                link.send_message(Msg::Polled(read.ok()));
            });
            false
        }
        Msg::Polled(read) => {
            let observed = read.as_ref().map(|(document, _)| document.status);
            let status = page.watch.record(observed);
            gloo_console::log!(format!("Generation poll {}: {:?}", page.watch.attempts(), status));

            if let (Some((document, versions)), Some(editor)) = (read, page.editor.as_mut()) {
                editor.observe_generation(document, versions);
            }
            match status {
                JobStatus::Completed => show_success("Document generated successfully!"),
                JobStatus::InProgress(_) => ctx.link().send_message(Msg::Poll),
                JobStatus::TimedOut => {
                    if let Some(editor) = page.editor.as_mut() {
                        editor.generation_stopped();
                    }
                    show_toast("Generation is still running. The new version will appear in the history.");
                }
            }
            true
        }

        Msg::Preview => {
            let Some(editor) = page.editor.as_ref() else {
                return false;
            };
            if page.previewing {
                return false;
            }
            page.previewing = true;
            let template_id = editor.document().template_id;
            let data = editor.current_data();
            spawn_local(async move {
                match api.post_for_bytes(endpoints::test_render(template_id), &data).await {
                    Ok(bytes) => link.send_message(Msg::PreviewReady(bytes)),
                    Err(err) => link.send_message(Msg::RequestFailed(err)),
                }
            });
            true
        }
        Msg::PreviewReady(bytes) => {
            page.previewing = false;
            if let Some(editor) = page.editor.as_ref() {
                save_file(&preview_file_name(editor.document()), &bytes, DownloadFormat::Docx.mime_type());
                show_success("Preview generated!");
            }
            true
        }

        Msg::Download(version, format) => {
            if page.downloading.is_some() {
                return false;
            }
            page.downloading = Some(version.id);
            let id = ctx.props().document_id;
            spawn_local(async move {
                match api.get_bytes(endpoints::download_version(id, version.id, format)).await {
                    Ok(bytes) => link.send_message(Msg::FileReady {
                        name: version.file_name(format),
                        bytes,
                        mime_type: format.mime_type(),
                    }),
                    Err(err) => link.send_message(Msg::RequestFailed(err)),
                }
            });
            true
        }
        Msg::FileReady { name, bytes, mime_type } => {
            page.downloading = None;
            save_file(&name, &bytes, mime_type);
            true
        }

        Msg::RequestFailed(err) => {
            page.previewing = false;
            page.downloading = None;
            report_error(&err);
            true
        }
        Msg::Back => {
            ctx.props().navigate.emit(Route::Documents);
            false
        }
    }
}
