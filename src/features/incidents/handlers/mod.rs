pub mod incident_handler;

pub use incident_handler::{
    __path_delete_incident, __path_search_incidents, __path_show_form, __path_submit_form,
    delete_incident, search_incidents, show_form, submit_form,
};
