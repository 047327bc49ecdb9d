//! Template manager: list, upload, test-render, source download and delete.

use std::collections::BTreeMap;

use common::api::{endpoints, ApiError};
use common::model::display_date;
use common::model::document::{DocumentType, DownloadFormat};
use common::model::template::Template;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::{input_value, open_in_new_tab, report_error, save_file, select_value, selected_file, show_error, show_success};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};

mod upload;

use upload::UploadForm;

#[derive(Properties, PartialEq)]
pub struct TemplatesProps {
    pub api: ApiClient,
}

pub enum Msg {
    Load,
    Loaded(Vec<Template>),
    OpenUpload,
    SetName(String),
    SetType(String),
    SetFile(Option<web_sys::File>),
    Upload,
    Uploaded(Template),
    OpenTestRender(i64),
    SetTestValue(String, String),
    TestRender,
    Rendered(Vec<u8>),
    DownloadSource(i64),
    Delete(i64),
    Deleted,
    Failed(ApiError),
}

pub struct TemplatesPage {
    templates: Vec<Template>,
    loading: bool,
    upload: UploadForm,
    uploading: bool,
    /// Template under test-render and the text typed per field.
    testing: Option<Template>,
    test_values: BTreeMap<String, String>,
    rendering: bool,
    upload_sheet: NodeRef,
    render_sheet: NodeRef,
    file_input: NodeRef,
}

impl Component for TemplatesPage {
    type Message = Msg;
    type Properties = TemplatesProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            templates: Vec::new(),
            loading: true,
            upload: UploadForm::default(),
            uploading: false,
            testing: None,
            test_values: BTreeMap::new(),
            rendering: false,
            upload_sheet: NodeRef::default(),
            render_sheet: NodeRef::default(),
            file_input: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        match msg {
            Msg::Load => {
                spawn_local(async move {
                    match api.get::<Vec<Template>>(endpoints::templates()).await {
                        Ok(templates) => link.send_message(Msg::Loaded(templates)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Loaded(templates) => {
                self.loading = false;
                self.templates = templates;
                true
            }

            Msg::OpenUpload => {
                self.upload = UploadForm::default();
                if let Some(input) = self.file_input.cast::<web_sys::HtmlInputElement>() {
                    input.set_value("");
                }
                open_top_sheet(self.upload_sheet.clone());
                true
            }
            Msg::SetName(name) => {
                self.upload.name = name;
                false
            }
            Msg::SetType(raw) => {
                if let Some(doc_type) = DocumentType::parse(&raw) {
                    self.upload.doc_type = doc_type;
                }
                false
            }
            Msg::SetFile(file) => {
                self.upload.file = file;
                true
            }
            Msg::Upload => {
                if self.uploading {
                    return false;
                }
                let form = match self.upload.to_form_data() {
                    Ok(form) => form,
                    Err(err) => {
                        show_error(&err.to_string());
                        return false;
                    }
                };
                self.uploading = true;
                spawn_local(async move {
                    match api.upload::<Template>(endpoints::templates(), form).await {
                        Ok(template) => link.send_message(Msg::Uploaded(template)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Uploaded(template) => {
                self.uploading = false;
                close_top_sheet(self.upload_sheet.clone());
                show_success(&format!("Template \"{}\" uploaded (v{})", template.name, template.version));
                ctx.link().send_message(Msg::Load);
                true
            }

            Msg::OpenTestRender(id) => {
                self.testing = self.templates.iter().find(|t| t.id == id).cloned();
                self.test_values.clear();
                if self.testing.is_some() {
                    open_top_sheet(self.render_sheet.clone());
                }
                true
            }
            Msg::SetTestValue(key, value) => {
                self.test_values.insert(key, value);
                false
            }
            Msg::TestRender => {
                let Some(template) = &self.testing else {
                    return false;
                };
                if self.rendering {
                    return false;
                }
                let data = template.schema_json.collect(&self.test_values);
                let id = template.id;
                self.rendering = true;
                spawn_local(async move {
                    match api.post_for_bytes(endpoints::test_render(id), &data).await {
                        Ok(bytes) => link.send_message(Msg::Rendered(bytes)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Rendered(bytes) => {
                self.rendering = false;
                if let Some(template) = &self.testing {
                    save_file(&template.preview_file_name(), &bytes, DownloadFormat::Docx.mime_type());
                    show_success("Preview generated!");
                }
                close_top_sheet(self.render_sheet.clone());
                true
            }

            Msg::DownloadSource(id) => {
                match self.templates.iter().find(|t| t.id == id).and_then(|t| t.docx_source_url.as_deref()) {
                    Some(url) => open_in_new_tab(url),
                    None => show_error("No source file is available for this template"),
                }
                false
            }
            Msg::Delete(id) => {
                spawn_local(async move {
                    match api.delete(endpoints::template(id)).await {
                        Ok(()) => link.send_message(Msg::Deleted),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Deleted => {
                show_success("Template deleted");
                ctx.link().send_message(Msg::Load);
                false
            }
            Msg::Failed(err) => {
                self.loading = false;
                self.uploading = false;
                self.rendering = false;
                report_error(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="page">
                <div class="page-header">
                    <div>
                        <h1>{"Templates"}</h1>
                        <p class="muted">{"Upload DOCX templates with {{placeholders}}"}</p>
                    </div>
                    <button class="btn primary" onclick={link.callback(|_| Msg::OpenUpload)}>
                        <i class="material-icons">{"upload_file"}</i>{"Upload Template"}
                    </button>
                </div>
                { self.list(link) }
                { self.upload_sheet(link) }
                { self.render_sheet(link) }
            </div>
        }
    }
}

impl TemplatesPage {
    fn list(&self, link: &yew::html::Scope<Self>) -> Html {
        if self.loading {
            return html! { <p class="muted">{"Loading..."}</p> };
        }
        if self.templates.is_empty() {
            return html! { <div class="card empty">{"No templates yet. Upload your first DOCX."}</div> };
        }
        html! {
            <div class="cards">
                {
                    for self.templates.iter().map(|template| {
                        let id = template.id;
                        html! {
                            <div class={classes!("card", "row", (!template.is_active).then_some("inactive"))} key={id.to_string()}>
                                <div>
                                    <h3>{ &template.name }</h3>
                                    <span class="badge">{ template.doc_type.as_str() }</span>
                                    <span class="muted">{ format!("v{}", template.version) }</span>
                                    <span class="muted">{ template.created_at.as_deref().map(display_date).unwrap_or_default() }</span>
                                </div>
                                <div class="actions">
                                    <button class="btn" title="Test render" onclick={link.callback(move |_| Msg::OpenTestRender(id))}>
                                        <i class="material-icons">{"science"}</i>
                                    </button>
                                    <button class="btn ghost" title="Download source" onclick={link.callback(move |_| Msg::DownloadSource(id))}>
                                        <i class="material-icons">{"download"}</i>
                                    </button>
                                    <button class="btn ghost" title="Delete" onclick={link.callback(move |_| Msg::Delete(id))}>
                                        <i class="material-icons">{"delete"}</i>
                                    </button>
                                </div>
                            </div>
                        }
                    })
                }
            </div>
        }
    }

    fn upload_sheet(&self, link: &yew::html::Scope<Self>) -> Html {
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Upload
        });

        html! {
            <YwMaterialTopSheet node_ref={self.upload_sheet.clone()} title="Upload Template">
                <form {onsubmit}>
                    <label for="tpl-name">{"Name"}</label>
                    <input
                        id="tpl-name"
                        placeholder="Invoice Modern"
                        value={self.upload.name.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::SetName(input_value(e)))}
                    />
                    <label for="tpl-type">{"Type"}</label>
                    <select id="tpl-type" onchange={link.callback(|e: Event| Msg::SetType(select_value(e)))}>
                        {
                            for DocumentType::ALL.iter().map(|t| html! {
                                <option value={t.as_str()} selected={*t == self.upload.doc_type}>{ t.label() }</option>
                            })
                        }
                    </select>
                    <label for="tpl-file">{"File (.docx)"}</label>
                    <input
                        id="tpl-file"
                        type="file"
                        accept=".docx"
                        ref={self.file_input.clone()}
                        onchange={link.callback(|e: Event| Msg::SetFile(selected_file(e)))}
                    />
                    <div class="actions">
                        <button type="submit" class="btn primary" disabled={self.uploading}>
                            { if self.uploading { "Uploading..." } else { "Upload" } }
                        </button>
                    </div>
                </form>
            </YwMaterialTopSheet>
        }
    }

    fn render_sheet(&self, link: &yew::html::Scope<Self>) -> Html {
        let (title, subtitle, fields) = match &self.testing {
            Some(t) => (format!("Test {}", t.name), Some(format!("v{}", t.version)), t.schema_json.fields()),
            None => ("Test Render".to_string(), None, Vec::new()),
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::TestRender
        });

        html! {
            <YwMaterialTopSheet node_ref={self.render_sheet.clone()} {title} {subtitle}>
                <form {onsubmit}>
                    if fields.is_empty() {
                        <p class="muted">{"This template declares no fields."}</p>
                    }
                    {
                        for fields.into_iter().map(|field| {
                            let key = field.key.clone();
                            let id = format!("test-{}", field.key);
                            html! {
                                <div class="field" key={field.key.clone()}>
                                    <label for={id.clone()}>{ field.label }</label>
                                    <input
                                        id={id}
                                        type={field.kind.input_type()}
                                        step={(field.kind.input_type() == "number").then_some("any")}
                                        required=true
                                        value={self.test_values.get(&field.key).cloned().unwrap_or_default()}
                                        oninput={link.callback(move |e: InputEvent| Msg::SetTestValue(key.clone(), input_value(e)))}
                                    />
                                </div>
                            }
                        })
                    }
                    <div class="actions">
                        <button type="submit" class="btn primary" disabled={self.rendering}>
                            { if self.rendering { "Rendering..." } else { "Render Preview" } }
                        </button>
                    </div>
                </form>
            </YwMaterialTopSheet>
        }
    }
}
