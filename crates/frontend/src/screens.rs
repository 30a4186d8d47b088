//! Every admin screen and the view model behind it
//!
//! The shell picks a [`Screen`] from its navigation and builds the matching
//! view model from the shared [`AdminContext`].

use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_city::aggregate::City;
use contracts::domain::a003_transport::aggregate::Transport;
use contracts::domain::a004_wholesaler::aggregate::Wholesaler;
use contracts::domain::a005_blog_category::aggregate::BlogCategory;
use contracts::domain::a006_blog_post::aggregate::{BlogPost, PostStatus};
use contracts::domain::a007_association::aggregate::Association;
use contracts::domain::a008_award::aggregate::Award;
use contracts::domain::a009_customer_group::aggregate::CustomerGroup;
use contracts::domain::a010_service::aggregate::Service;
use contracts::domain::a011_menu::aggregate::MenuNode;
use contracts::domain::a012_member_point::aggregate::MemberPoint;
use contracts::shared::resource::{Resource, SettingsGroup};
use contracts::system::otp_config::OtpConfig;
use contracts::system::settings::{ContactSettings, SeoSettings};
use contracts::system::users::User;

use crate::domain::a011_menu::ui::tree::view_model::MenuTreeViewModel;
use crate::shared::crud::{CrudListViewModel, SettingsViewModel, SortableListViewModel};
use crate::system::auth::context::AdminContext;
use crate::system::otp_config::view_model::OtpConfigViewModel;

pub type CountriesScreen = CrudListViewModel<Country>;
pub type CitiesScreen = CrudListViewModel<City>;
pub type TransportsScreen = CrudListViewModel<Transport>;
pub type WholesalersScreen = CrudListViewModel<Wholesaler>;
pub type UsersScreen = CrudListViewModel<User>;
pub type BlogPostsScreen = CrudListViewModel<BlogPost>;
pub type MemberPointsScreen = CrudListViewModel<MemberPoint>;

pub type BlogCategoriesScreen = SortableListViewModel<BlogCategory>;
pub type AssociationsScreen = SortableListViewModel<Association>;
pub type AwardsScreen = SortableListViewModel<Award>;
pub type CustomerGroupsScreen = SortableListViewModel<CustomerGroup>;
pub type ServicesScreen = SortableListViewModel<Service>;

pub type SeoSettingsScreen = SettingsViewModel<SeoSettings>;
pub type ContactSettingsScreen = SettingsViewModel<ContactSettings>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Countries,
    Cities,
    Transports,
    Wholesalers,
    Users,
    BlogCategories,
    BlogPosts,
    Associations,
    Awards,
    CustomerGroups,
    Services,
    Menus,
    MemberPoints,
    SeoSettings,
    ContactSettings,
    OtpConfig,
}

impl Screen {
    pub const ALL: [Screen; 16] = [
        Screen::Countries,
        Screen::Cities,
        Screen::Transports,
        Screen::Wholesalers,
        Screen::Users,
        Screen::BlogCategories,
        Screen::BlogPosts,
        Screen::Associations,
        Screen::Awards,
        Screen::CustomerGroups,
        Screen::Services,
        Screen::Menus,
        Screen::MemberPoints,
        Screen::SeoSettings,
        Screen::ContactSettings,
        Screen::OtpConfig,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Countries => Country::list_name(),
            Screen::Cities => City::list_name(),
            Screen::Transports => Transport::list_name(),
            Screen::Wholesalers => Wholesaler::list_name(),
            Screen::Users => User::list_name(),
            Screen::BlogCategories => BlogCategory::list_name(),
            Screen::BlogPosts => BlogPost::list_name(),
            Screen::Associations => Association::list_name(),
            Screen::Awards => Award::list_name(),
            Screen::CustomerGroups => CustomerGroup::list_name(),
            Screen::Services => Service::list_name(),
            Screen::Menus => MenuNode::list_name(),
            Screen::MemberPoints => MemberPoint::list_name(),
            Screen::SeoSettings => SeoSettings::title(),
            Screen::ContactSettings => ContactSettings::title(),
            Screen::OtpConfig => OtpConfig::title(),
        }
    }

    /// Backend path the screen works on
    pub fn api_path(&self) -> &'static str {
        match self {
            Screen::Countries => Country::path(),
            Screen::Cities => City::path(),
            Screen::Transports => Transport::path(),
            Screen::Wholesalers => Wholesaler::path(),
            Screen::Users => User::path(),
            Screen::BlogCategories => BlogCategory::path(),
            Screen::BlogPosts => BlogPost::path(),
            Screen::Associations => Association::path(),
            Screen::Awards => Award::path(),
            Screen::CustomerGroups => CustomerGroup::path(),
            Screen::Services => Service::path(),
            Screen::Menus => MenuNode::path(),
            Screen::MemberPoints => MemberPoint::path(),
            Screen::SeoSettings => <SeoSettings as SettingsGroup>::path(),
            Screen::ContactSettings => <ContactSettings as SettingsGroup>::path(),
            Screen::OtpConfig => <OtpConfig as SettingsGroup>::path(),
        }
    }

    /// Whether rows can be moved by the user
    pub fn is_sortable(&self) -> bool {
        matches!(
            self,
            Screen::BlogCategories
                | Screen::Associations
                | Screen::Awards
                | Screen::CustomerGroups
                | Screen::Services
                | Screen::Menus
        )
    }
}

/// View model of the screen on display
#[derive(Clone)]
pub enum ScreenModel {
    Countries(CountriesScreen),
    Cities(CitiesScreen),
    Transports(TransportsScreen),
    Wholesalers(WholesalersScreen),
    Users(UsersScreen),
    BlogCategories(BlogCategoriesScreen),
    BlogPosts(BlogPostsScreen),
    Associations(AssociationsScreen),
    Awards(AwardsScreen),
    CustomerGroups(CustomerGroupsScreen),
    Services(ServicesScreen),
    Menus(MenuTreeViewModel),
    MemberPoints(MemberPointsScreen),
    SeoSettings(SeoSettingsScreen),
    ContactSettings(ContactSettingsScreen),
    OtpConfig(OtpConfigViewModel),
}

impl ScreenModel {
    /// Build the view model and start its first fetch
    pub fn open(screen: Screen, context: &AdminContext) -> Self {
        log::debug!("opening {} ({})", screen.title(), screen.api_path());
        let model = match screen {
            Screen::Countries => ScreenModel::Countries(CrudListViewModel::new(context)),
            Screen::Cities => ScreenModel::Cities(CrudListViewModel::new(context)),
            Screen::Transports => ScreenModel::Transports(CrudListViewModel::new(context)),
            Screen::Wholesalers => ScreenModel::Wholesalers(CrudListViewModel::new(context)),
            Screen::Users => ScreenModel::Users(CrudListViewModel::new(context)),
            Screen::BlogCategories => ScreenModel::BlogCategories(SortableListViewModel::new(context)),
            Screen::BlogPosts => ScreenModel::BlogPosts(CrudListViewModel::new(context)),
            Screen::Associations => ScreenModel::Associations(SortableListViewModel::new(context)),
            Screen::Awards => ScreenModel::Awards(SortableListViewModel::new(context)),
            Screen::CustomerGroups => ScreenModel::CustomerGroups(SortableListViewModel::new(context)),
            Screen::Services => ScreenModel::Services(SortableListViewModel::new(context)),
            Screen::Menus => ScreenModel::Menus(MenuTreeViewModel::new(context)),
            Screen::MemberPoints => ScreenModel::MemberPoints(CrudListViewModel::new(context)),
            Screen::SeoSettings => ScreenModel::SeoSettings(SettingsViewModel::new(context)),
            Screen::ContactSettings => ScreenModel::ContactSettings(SettingsViewModel::new(context)),
            Screen::OtpConfig => ScreenModel::OtpConfig(OtpConfigViewModel::new(context)),
        };
        model.load();
        model
    }

    pub fn load(&self) {
        match self {
            ScreenModel::Countries(vm) => vm.load(),
            ScreenModel::Cities(vm) => vm.load(),
            ScreenModel::Transports(vm) => vm.load(),
            ScreenModel::Wholesalers(vm) => vm.load(),
            ScreenModel::Users(vm) => vm.load(),
            ScreenModel::BlogCategories(vm) => vm.load(),
            ScreenModel::BlogPosts(vm) => vm.load(),
            ScreenModel::Associations(vm) => vm.load(),
            ScreenModel::Awards(vm) => vm.load(),
            ScreenModel::CustomerGroups(vm) => vm.load(),
            ScreenModel::Services(vm) => vm.load(),
            ScreenModel::Menus(vm) => vm.load(),
            ScreenModel::MemberPoints(vm) => vm.load(),
            ScreenModel::SeoSettings(vm) => vm.load(),
            ScreenModel::ContactSettings(vm) => vm.load(),
            ScreenModel::OtpConfig(vm) => vm.load(),
        }
    }
}

impl CrudListViewModel<City> {
    pub fn filter_country(&self, country_id: Option<i64>) {
        self.set_filter(|query| query.country_id = country_id);
    }
}

impl CrudListViewModel<BlogPost> {
    pub fn filter_status(&self, status: Option<PostStatus>) {
        self.set_filter(|query| query.status = status.map(|s| s.as_str().to_string()));
    }

    pub fn filter_category(&self, category_id: Option<i64>) {
        self.set_filter(|query| query.category_id = category_id);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_screen_has_its_own_path() {
        let paths: HashSet<&str> = Screen::ALL.iter().map(Screen::api_path).collect();
        assert_eq!(paths.len(), Screen::ALL.len());
        assert_eq!(Screen::OtpConfig.api_path(), "otp-config");
        assert_eq!(Screen::Menus.api_path(), "menus");
    }

    #[test]
    fn test_sortable_screens() {
        let sortable: Vec<Screen> = Screen::ALL.into_iter().filter(Screen::is_sortable).collect();
        assert_eq!(
            sortable,
            vec![
                Screen::BlogCategories,
                Screen::Associations,
                Screen::Awards,
                Screen::CustomerGroups,
                Screen::Services,
                Screen::Menus,
            ]
        );
    }
}
