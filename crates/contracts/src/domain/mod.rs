pub mod a001_country;
pub mod a002_city;
pub mod a003_transport;
pub mod a004_wholesaler;
pub mod a005_blog_category;
pub mod a006_blog_post;
pub mod a007_association;
pub mod a008_award;
pub mod a009_customer_group;
pub mod a010_service;
pub mod a011_menu;
pub mod a012_member_point;

pub(crate) fn default_true() -> bool {
    true
}
