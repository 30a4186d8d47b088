pub mod a011_menu;
