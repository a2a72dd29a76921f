pub use tera::{Context, Tera};

lazy_static! {
    pub static ref TEMPLATE_SERVICE: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("../../templates/layout.html")),
            (
                "standings/show.html",
                include_str!("../../templates/standings/show.html"),
            ),
        ])
        .expect("Built-in templates failed to compile");
        tera
    };
}
