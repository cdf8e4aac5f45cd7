pub mod shared {
    pub mod infrastructure {
        pub mod engagement_store;
    }
}

pub mod modules {
    pub mod engagements {
        pub mod core {
            pub mod dwell;
            pub mod guard;
            pub mod kind;
            pub mod toggle;
        }
        pub mod use_cases {
            pub mod publish_work {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod track_view {
                pub mod inbound {
                    pub mod http;
                }
                pub mod tracker;
            }
            pub mod toggle_engagement {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod get_engagement_counts {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
