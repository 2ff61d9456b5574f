pub mod shared {
    pub mod core {
        pub mod formatting;
        pub mod repository_error;
    }
    pub mod infrastructure {
        pub mod database;
        pub mod mailer;
    }
}

pub mod modules {
    pub mod accounts {
        pub mod core {
            pub mod ports;
            pub mod principal;
            pub mod user;
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
                pub mod session;
            }
            pub mod outbound {
                pub mod users_in_memory;
                pub mod users_sqlite;
            }
        }
    }

    pub mod payments {
        pub mod core {
            pub mod assignment;
            pub mod ports;
            pub mod record;
        }
        pub mod use_cases {
            pub mod upload_batch {
                pub mod command;
                pub mod distribute;
                pub mod handler;
                pub mod parse;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod complete_payment {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod sweep_overdue {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_assigned_records {
                pub mod projection;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod dashboard_stats {
                pub mod projection;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
            pub mod outbound {
                pub mod payments_in_memory;
                pub mod payments_sqlite;
            }
        }
    }

    pub mod notifications {
        pub mod core {
            pub mod email_log;
            pub mod notification;
            pub mod ports;
            pub mod templates;
        }
        pub mod use_cases {
            pub mod dispatch {
                pub mod handler;
            }
            pub mod list_notifications {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod count_unread {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_read_state {
                pub mod command;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
            }
            pub mod outbound {
                pub mod notifications_in_memory;
                pub mod notifications_sqlite;
            }
        }
    }
}

pub mod shell;
