//! View rendering for the document editor page.
//!
//! Layout: a header with the document identity and the three actions (save,
//! preview, generate), the data form built from the template schema, and a
//! side card listing the generated versions with their downloads.

use common::editor::{DocumentEditor, EditorPhase, FieldView, RelatedState};
use common::model::display_date;
use common::model::document::DownloadFormat;
use yew::prelude::*;

use crate::helpers::input_value;

use super::messages::Msg;
use super::state::DocumentEditorPage;

pub fn view(page: &DocumentEditorPage, ctx: &Context<DocumentEditorPage>) -> Html {
    let link = ctx.link();
    let back = html! {
        <button class="btn ghost" onclick={link.callback(|_| Msg::Back)}>
            <i class="material-icons">{"arrow_back"}</i>{"Documents"}
        </button>
    };

    let Some(editor) = page.editor.as_ref() else {
        let message = if page.load_failed { "Document not found." } else { "Loading..." };
        return html! {
            <div class="page">
                { back }
                <div class="card empty">{ message }</div>
            </div>
        };
    };

    html! {
        <div class="page">
            { back }
            { header(page, editor, link) }
            <div class="editor-grid">
                <div class="card">
                    <h2>{"Document Data"}</h2>
                    { form(editor, link) }
                </div>
                <div class="card">
                    <h2>{"Version History"}</h2>
                    { versions(page, editor, link) }
                </div>
            </div>
        </div>
    }
}

fn header(page: &DocumentEditorPage, editor: &DocumentEditor, link: &yew::html::Scope<DocumentEditorPage>) -> Html {
    let document = editor.document();
    let phase = editor.phase();
    let client = editor
        .client()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Client #{}", document.client_id));
    let template = editor.template().map(|t| t.picker_label()).unwrap_or_default();

    html! {
        <div class="page-header">
            <div>
                <h1>
                    { format!("{} #{}", document.doc_type.label(), document.id) }
                    <span class={classes!("badge", document.status.is_draft().then_some("draft"))}>
                        { document.status.as_str() }
                    </span>
                </h1>
                <p class="muted">{ client }{" · "}{ template }</p>
            </div>
            <div class="actions">
                <button
                    class="btn"
                    disabled={!editor.can_save()}
                    onclick={link.callback(|_| Msg::Save)}
                >
                    <i class="material-icons">{"save"}</i>
                    { if phase == EditorPhase::Saving { "Saving..." } else if editor.is_dirty() { "Save Draft *" } else { "Save Draft" } }
                </button>
                <button
                    class="btn"
                    disabled={page.previewing}
                    onclick={link.callback(|_| Msg::Preview)}
                >
                    <i class="material-icons">{"visibility"}</i>
                    { if page.previewing { "Rendering..." } else { "Preview" } }
                </button>
                <button
                    class="btn primary"
                    disabled={!editor.can_generate()}
                    onclick={link.callback(|_| Msg::Generate)}
                >
                    <i class="material-icons">{"picture_as_pdf"}</i>
                    { if phase == EditorPhase::Generating { "Generating..." } else { "Generate Final" } }
                </button>
            </div>
        </div>
    }
}

fn form(editor: &DocumentEditor, link: &yew::html::Scope<DocumentEditorPage>) -> Html {
    match editor.related_state() {
        RelatedState::Loading => return html! { <p class="muted">{"Loading template..."}</p> },
        RelatedState::Failed => {
            return html! {
                <div class="card empty">
                    <i class="material-icons">{"error_outline"}</i>
                    <p>{"Could not load the template for this document."}</p>
                </div>
            };
        }
        RelatedState::Ready => {}
    }
    let fields = editor.fields();
    if fields.is_empty() {
        return html! { <p class="muted">{"This template has no fields."}</p> };
    }
    let readonly = !editor.document().status.is_draft();

    html! {
        <div class="form-grid">
            { for fields.into_iter().map(|field| field_input(field, readonly, link)) }
        </div>
    }
}

fn field_input(field: FieldView, readonly: bool, link: &yew::html::Scope<DocumentEditorPage>) -> Html {
    let key = field.key.clone();
    let oninput = link.callback(move |e: InputEvent| Msg::SetField(key.clone(), input_value(e)));
    let id = format!("field-{}", field.key);

    html! {
        <div class="field" key={field.key.clone()}>
            <label for={id.clone()}>{ &field.label }</label>
            <input
                id={id}
                type={field.kind.input_type()}
                step={(field.kind.input_type() == "number").then_some("any")}
                value={field.value}
                {readonly}
                {oninput}
            />
        </div>
    }
}

fn versions(page: &DocumentEditorPage, editor: &DocumentEditor, link: &yew::html::Scope<DocumentEditorPage>) -> Html {
    if editor.versions().is_empty() {
        return html! { <p class="muted">{"No versions generated yet."}</p> };
    }

    html! {
        <ul class="rows">
            {
                for editor.versions().iter().map(|version| {
                    let busy = page.downloading == Some(version.id);
                    let pdf = version.clone();
                    let docx = version.clone();
                    html! {
                        <li class="row" key={version.id.to_string()}>
                            <div>
                                <strong>{ &version.doc_number }</strong>
                                <span class="muted">
                                    { format!("v{}", version.version_number) }
                                    { version.generated_at.as_deref().map(|d| format!(" · {}", display_date(d))).unwrap_or_default() }
                                </span>
                            </div>
                            <div class="actions">
                                <button
                                    class="btn ghost"
                                    disabled={busy}
                                    onclick={link.callback(move |_| Msg::Download(pdf.clone(), DownloadFormat::Pdf))}
                                >{"PDF"}</button>
                                <button
                                    class="btn ghost"
                                    disabled={busy}
                                    onclick={link.callback(move |_| Msg::Download(docx.clone(), DownloadFormat::Docx))}
                                >{"DOCX"}</button>
                            </div>
                        </li>
                    }
                })
            }
        </ul>
    }
}
