use std::rc::Rc;

use futures::{future::LocalBoxFuture, FutureExt};
use platform_host::{Group, Organization, UserSession};
use system_ui::{
    Button, ButtonSize, ButtonVariant, EmptyState, IconName, ListRow, ListSurface,
    LoadingIndicator, Panel, Text, TextRole, TextTone, ToolBar,
};

use super::{
    dialog::{ConfirmDialog, ConfirmHandler, CreateDialog, CreateHandler, DialogVariant},
    menus::{ContextMenuEntry, ContextMenuPopup},
    *,
};
use crate::{
    admin::{
        create_group, create_organization, delete_group, delete_organization, fetch_groups,
        fetch_organizations, fetch_sessions, revoke_session, sorted_rows, AdminRecord, ListState,
        LoadGeneration,
    },
    menus::{MenuCommand, ViewMode},
};

type LoadFn<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, ListState<T>>>;
type CreateFn<T> = Rc<dyn Fn(String, Option<String>) -> LocalBoxFuture<'static, Result<T, String>>>;
type DeleteFn<T> = Rc<dyn Fn(T) -> LocalBoxFuture<'static, Result<(), String>>>;

/// Wiring for one admin list window.
struct AdminListConfig<T: 'static> {
    /// Singular noun used in labels ("organization").
    noun: &'static str,
    /// Accessible list label ("Organizations").
    list_label: &'static str,
    /// Verb of the destructive row action ("Delete", "Revoke").
    delete_verb: &'static str,
    load: LoadFn<T>,
    create: Option<CreateFn<T>>,
    delete: DeleteFn<T>,
    can_delete: fn(&T) -> bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RowMenu {
    record_id: String,
    position: PopupPosition,
}

fn admin_list<T>(config: AdminListConfig<T>) -> View
where
    T: AdminRecord + Clone + 'static,
{
    let runtime = use_desktop_runtime();
    let window = use_feature_window();
    let view_state = window.view_state;
    let AdminListConfig {
        noun,
        list_label,
        delete_verb,
        load,
        create,
        delete,
        can_delete,
    } = config;
    let load = store_value(load);
    let delete = store_value(delete);

    let list = create_rw_signal(ListState::<T>::Loading);
    let row_menu = create_rw_signal(None::<RowMenu>);
    let pending_delete = create_rw_signal(None::<T>);
    let create_open = create_rw_signal(false);

    let generation = store_value(LoadGeneration::default());

    let reload = move || {
        let Some(load) = load.try_get_value() else {
            return;
        };
        let Some(ticket) = generation.try_update_value(LoadGeneration::begin) else {
            return;
        };
        list.set(ListState::Loading);
        spawn_local(async move {
            let next = load().await;
            if let ListState::Failed(message) = &next {
                logging::warn!("{list_label} failed to load: {message}");
            }
            let applied = generation
                .try_with_value(|generation| {
                    list.try_update(|list| generation.finish(ticket, list, next))
                })
                .flatten()
                .unwrap_or(false);
            if !applied {
                logging::log!("{list_label}: dropped a superseded load");
            }
        });
    };
    create_effect(move |_| {
        let _ = view_state.with(|view| view.refresh_token);
        reload();
    });

    let delete_handler: ConfirmHandler = Rc::new(move || {
        let target = pending_delete.get_untracked();
        let delete = delete.try_get_value();
        async move {
            let (Some(target), Some(delete)) = (target, delete) else {
                return Ok(());
            };
            let record_id = target.record_id().to_string();
            delete(target).await?;
            list.try_update(|list| {
                list.remove(&record_id);
            });
            Ok::<(), String>(())
        }
        .boxed_local()
    });

    let create_handler: Option<CreateHandler> = create.map(|create| {
        let handler: CreateHandler = Rc::new(move |name: String, description: Option<String>| {
            let create = Rc::clone(&create);
            async move {
                let created = create(name, description).await?;
                list.try_update(|list| list.push(created));
                Ok::<(), String>(())
            }
            .boxed_local()
        });
        handler
    });
    let can_create = create_handler.is_some();

    let rows = move || {
        let order = view_state.with(|view| view.sort_order);
        list.with(|list| sorted_rows(list.items(), order))
    };
    let open_row_menu = move |record_id: String, ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        let position = clamp_popup_position(runtime, ev.client_x(), ev.client_y(), 200, 60);
        row_menu.set(Some(RowMenu {
            record_id,
            position,
        }));
    };
    let dom_prefix = format!("{}-admin", window.controller.window_id.dom_id());
    let row_menu_id = format!("{dom_prefix}-row-menu");

    view! {
        <Panel layout_class="admin-list" role="region" aria_label=list_label>
            <ToolBar aria_label=format!("{list_label} actions")>
                <Button
                    size=ButtonSize::Sm
                    leading_icon=IconName::Refresh
                    on_click=Callback::new(move |_| view_state.update(|view| view.apply(MenuCommand::Refresh)))
                >
                    "Refresh"
                </Button>
                <Show when=move || can_create fallback=|| ()>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Primary
                        leading_icon=IconName::Plus
                        on_click=Callback::new(move |_| create_open.set(true))
                    >
                        {format!("New {noun}")}
                    </Button>
                </Show>
            </ToolBar>
            {move || match list.with(|list| match list {
                ListState::Loading => Some(None),
                ListState::Failed(message) => Some(Some(message.clone())),
                ListState::Loaded(_) => None,
            }) {
                Some(None) => view! { <LoadingIndicator label=format!("Loading {list_label}...") /> }.into_view(),
                Some(Some(message)) => view! {
                    <EmptyState icon=IconName::Warning>
                        <Text tone=TextTone::Danger aria_role="alert">{message}</Text>
                        <Button on_click=Callback::new(move |_| reload())>"Retry"</Button>
                    </EmptyState>
                }
                .into_view(),
                None if list.with(|list| list.items().is_empty()) => view! {
                    <EmptyState>
                        <Text tone=TextTone::Secondary>{format!("No {list_label} yet.")}</Text>
                    </EmptyState>
                }
                .into_view(),
                None => match view_state.with(|view| view.view_mode) {
                    ViewMode::List => view! {
                        <ListSurface aria_label=list_label>
                            {rows()
                                .into_iter()
                                .map(|row| {
                                    let record_id = row.record_id().to_string();
                                    let menu_target = record_id.clone();
                                    let selected = Signal::derive(move || {
                                        row_menu.with(|menu| {
                                            menu.as_ref().is_some_and(|menu| menu.record_id == record_id)
                                        })
                                    });
                                    let display_name = row.display_name().to_string();
                                    let secondary_text = row.secondary_text().map(|text| text.to_string());
                                    view! {
                                        <ListRow
                                            selected
                                            on_contextmenu=Callback::new(move |ev| open_row_menu(menu_target.clone(), ev))
                                        >
                                            <Text>{display_name.clone()}</Text>
                                            {secondary_text.clone().map(|text| view! {
                                                <Text role=TextRole::Caption tone=TextTone::Secondary>{text.to_string()}</Text>
                                            })}
                                        </ListRow>
                                    }
                                })
                                .collect_view()}
                        </ListSurface>
                    }
                    .into_view(),
                    ViewMode::Table => view! {
                        <table class="admin-table" aria-label=list_label>
                            <thead>
                                <tr>
                                    <th scope="col">"Name"</th>
                                    <th scope="col">"Details"</th>
                                    <th scope="col">"Created"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows()
                                    .into_iter()
                                    .map(|row| {
                                        let record_id = row.record_id().to_string();
                                        view! {
                                            <tr on:contextmenu=move |ev| open_row_menu(record_id.clone(), ev)>
                                                <td>{row.display_name().to_string()}</td>
                                                <td>{row.secondary_text().unwrap_or_default().to_string()}</td>
                                                <td>{row.created_at().to_string()}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_view(),
                },
            }}
            {move || {
                row_menu
                    .get()
                    .map(|menu| {
                        let record_id = menu.record_id.clone();
                        let deletable = list.with_untracked(|list| list.find(&record_id).map(can_delete));
                        let entries = match deletable {
                            Some(true) => vec![
                                ContextMenuEntry::new(delete_verb, move || {
                                    let target = list.with_untracked(|list| list.find(&record_id).cloned());
                                    pending_delete.set(target);
                                })
                                .danger(),
                            ],
                            _ => Vec::new(),
                        };
                        if entries.is_empty() {
                            row_menu.set(None);
                            return ().into_view();
                        }
                        view! {
                            <ContextMenuPopup
                                id=row_menu_id.clone()
                                aria_label=format!("{noun} actions")
                                position=menu.position
                                entries
                                on_close=Callback::new(move |()| row_menu.set(None))
                            />
                        }
                        .into_view()
                    })
            }}
            <ConfirmDialog
                id=format!("{dom_prefix}-confirm")
                open=Signal::derive(move || pending_delete.with(Option::is_some))
                on_open_change=Callback::new(move |open: bool| {
                    if !open {
                        pending_delete.set(None);
                    }
                })
                title=format!("{delete_verb} {noun}")
                description=Signal::derive(move || {
                    pending_delete
                        .with(|target| target.as_ref().map(|target| target.display_name().to_string()))
                        .map(|name| format!("{delete_verb} \u{201c}{name}\u{201d}? This cannot be undone."))
                        .unwrap_or_default()
                })
                confirm_label=delete_verb
                busy_label=format!("{}...", progressive(delete_verb))
                variant=DialogVariant::Destructive
                on_confirm=delete_handler
            />
            {create_handler.map(|on_create| view! {
                <CreateDialog
                    id=format!("{dom_prefix}-create")
                    open=create_open
                    on_open_change=Callback::new(move |open| create_open.set(open))
                    title=format!("New {noun}")
                    on_create
                />
            })}
        </Panel>
    }
    .into_view()
}

/// "Delete" → "Deleting", "Revoke" → "Revoking".
fn progressive(verb: &str) -> String {
    format!("{}ing", verb.strip_suffix('e').unwrap_or(verb))
}

#[component]
pub(super) fn OrganizationsList() -> impl IntoView {
    let api = use_desktop_runtime()
        .host
        .with_value(|host| Rc::clone(&host.admin_api));
    let (load_api, create_api, delete_api) = (Rc::clone(&api), Rc::clone(&api), api);

    admin_list::<Organization>(AdminListConfig {
        noun: "organization",
        list_label: "Organizations",
        delete_verb: "Delete",
        load: Rc::new(move || {
            let api = Rc::clone(&load_api);
            async move { fetch_organizations(api.as_ref()).await }.boxed_local()
        }),
        create: Some(Rc::new(move |name: String, description: Option<String>| {
            let api = Rc::clone(&create_api);
            async move { create_organization(api.as_ref(), name, description).await }.boxed_local()
        })),
        delete: Rc::new(move |organization: Organization| {
            let api = Rc::clone(&delete_api);
            async move { delete_organization(api.as_ref(), &organization.id).await }.boxed_local()
        }),
        can_delete: |_| true,
    })
}

#[component]
pub(super) fn GroupsList() -> impl IntoView {
    let api = use_desktop_runtime()
        .host
        .with_value(|host| Rc::clone(&host.admin_api));
    let (load_api, create_api, delete_api) = (Rc::clone(&api), Rc::clone(&api), api);

    admin_list::<Group>(AdminListConfig {
        noun: "group",
        list_label: "Groups",
        delete_verb: "Delete",
        load: Rc::new(move || {
            let api = Rc::clone(&load_api);
            async move { fetch_groups(api.as_ref()).await }.boxed_local()
        }),
        create: Some(Rc::new(move |name: String, description: Option<String>| {
            let api = Rc::clone(&create_api);
            async move { create_group(api.as_ref(), name, description).await }.boxed_local()
        })),
        delete: Rc::new(move |group: Group| {
            let api = Rc::clone(&delete_api);
            async move { delete_group(api.as_ref(), &group.id).await }.boxed_local()
        }),
        can_delete: |_| true,
    })
}

#[component]
pub(super) fn SessionsList() -> impl IntoView {
    let api = use_desktop_runtime()
        .host
        .with_value(|host| Rc::clone(&host.sessions_api));
    let (load_api, delete_api) = (Rc::clone(&api), api);

    admin_list::<UserSession>(AdminListConfig {
        noun: "session",
        list_label: "Sessions",
        delete_verb: "Revoke",
        load: Rc::new(move || {
            let api = Rc::clone(&load_api);
            async move { fetch_sessions(api.as_ref()).await }.boxed_local()
        }),
        create: None,
        delete: Rc::new(move |session: UserSession| {
            let api = Rc::clone(&delete_api);
            async move { revoke_session(api.as_ref(), &session).await }.boxed_local()
        }),
        can_delete: |session| !session.is_current,
    })
}
